//! Invaders - a single-screen arcade shooter for the terminal
//!
//! Core modules:
//! - `entities`: Plain game data (player, enemies, bullets, state)
//! - `compute`: Per-frame simulation, pure apart from the injected RNG
//! - `display`: Terminal renderer
//! - `config`: Startup settings read from the environment

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;

/// Game configuration constants (playfield units are pixels, time is frames)
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Frame clock cap
    pub const FPS: u64 = 60;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Spawn point: centre x and bottom edge y
    pub const PLAYER_START_X: f32 = SCREEN_WIDTH / 2.0;
    pub const PLAYER_START_BOTTOM: f32 = SCREEN_HEIGHT - 30.0;
    /// Frames between shots
    pub const COOLDOWN_FRAMES: u32 = 10;

    /// Bullets
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// How far past the playfield a bullet may travel before it is culled
    pub const BULLET_MARGIN: f32 = 50.0;

    /// Enemy grid
    pub const ENEMY_ROWS: usize = 4;
    pub const ENEMY_COLS: usize = 8;
    pub const ENEMY_SIZE: f32 = 34.0;
    pub const ENEMY_H_SPACING: f32 = 60.0;
    pub const ENEMY_V_SPACING: f32 = 40.0;
    pub const ENEMY_START_Y: f32 = 60.0;

    /// Formation movement
    pub const ENEMY_SPEED_X: f32 = 1.0;
    pub const ENEMY_DESCEND_STEP: f32 = 20.0;
    pub const EDGE_MARGIN: f32 = 5.0;
    /// Speed multiplier applied on every wave clear
    pub const WAVE_SPEED_GROWTH: f32 = 1.12;

    /// Chance per frame that some alive enemy fires
    pub const ENEMY_FIRE_CHANCE: f64 = 0.02;

    /// Scoring
    pub const KILL_SCORE: u32 = 10;
    pub const WAVE_CLEAR_BONUS: u32 = 50;
}
