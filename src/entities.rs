//! All game entity types — pure data, no logic.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in playfield pixels.  `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Box of size `w`×`h` whose centre sits at (`cx`, `cy`).
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Rect { x: cx - w / 2.0, y: cy - h / 2.0, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Owner decides direction of travel and what a bullet can hit:
/// player bullets fly up and hit enemies, enemy bullets fly down and hit the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Vertical velocity in pixels per frame (negative = upward).
    pub vy: f32,
    pub owner: BulletOwner,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Frames remaining until the next shot is allowed.
    pub cooldown: u32,
}

/// Dead enemies stay in the grid until the wave is replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub alive: bool,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Input commands for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    /// Horizontal intent: -1 left, 0 idle, +1 right.
    pub dx: i32,
    /// Shoot key currently held.
    pub shoot: bool,
    /// One-shot restart request; only honoured while the game is over.
    pub restart: bool,
}

impl Input {
    /// Resolve held direction keys into an intent.  Right wins when both are held.
    pub fn from_keys(left: bool, right: bool, shoot: bool, restart: bool) -> Self {
        let dx = if right {
            1
        } else if left {
            -1
        } else {
            0
        };
        Input { dx, shoot, restart }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Row-major grid, top-left first.
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Formation heading: +1 right, -1 left.
    pub direction: f32,
    /// Formation horizontal speed in pixels per frame.
    pub enemy_speed: f32,
    pub score: u32,
    pub wave: u32,
    pub status: GameStatus,
    /// Only meaningful once `status` is `GameOver`.
    pub won: bool,
    /// Clearing this wave (or any later one) wins the game.  `None` means no win is reachable.
    pub win_after_waves: Option<u32>,
}
