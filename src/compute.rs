//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use log::{debug, info};
use rand::Rng;

use crate::consts::*;
use crate::entities::{Bullet, BulletOwner, Enemy, GameState, GameStatus, Input, Player, Rect};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Strict axis-aligned overlap: boxes that only share an edge do not collide.
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A full rows × cols grid at the standard start layout, all alive.
pub fn spawn_wave() -> Vec<Enemy> {
    let total_width = (ENEMY_COLS - 1) as f32 * ENEMY_H_SPACING;
    let start_x = (SCREEN_WIDTH - total_width) / 2.0;

    let mut enemies = Vec::with_capacity(ENEMY_ROWS * ENEMY_COLS);
    for row in 0..ENEMY_ROWS {
        for col in 0..ENEMY_COLS {
            let cx = start_x + col as f32 * ENEMY_H_SPACING;
            let cy = ENEMY_START_Y + row as f32 * ENEMY_V_SPACING;
            enemies.push(Enemy {
                rect: Rect::centered(cx, cy, ENEMY_SIZE, ENEMY_SIZE),
                alive: true,
            });
        }
    }
    enemies
}

/// Build the initial game state: wave 1, zero score, centred player.
pub fn init_state(win_after_waves: Option<u32>) -> GameState {
    GameState {
        player: Player {
            rect: Rect::new(
                PLAYER_START_X - PLAYER_WIDTH / 2.0,
                PLAYER_START_BOTTOM - PLAYER_HEIGHT,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            cooldown: 0,
        },
        enemies: spawn_wave(),
        bullets: Vec::new(),
        direction: 1.0,
        enemy_speed: ENEMY_SPEED_X,
        score: 0,
        wave: 1,
        status: GameStatus::Playing,
        won: false,
        win_after_waves,
    }
}

// ── HUD helpers ──────────────────────────────────────────────────────────────

pub fn alive_count(state: &GameState) -> usize {
    state.enemies.iter().filter(|e| e.alive).count()
}

/// Headline for the game-over overlay, `None` while still playing.
pub fn banner(state: &GameState) -> Option<&'static str> {
    match state.status {
        GameStatus::Playing => None,
        GameStatus::GameOver if state.won => Some("YOU WIN!"),
        GameStatus::GameOver => Some("GAME OVER"),
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Shift the player by `dx` × speed, clamped to the playfield.
pub fn move_player(state: &GameState, dx: i32) -> GameState {
    let rect = state.player.rect;
    let x = (rect.x + dx.signum() as f32 * PLAYER_SPEED).clamp(0.0, SCREEN_WIDTH - rect.w);
    GameState {
        player: Player {
            rect: Rect { x, ..rect },
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Tick the shot cooldown down by one frame, floored at zero.
pub fn cool_down(state: &GameState) -> GameState {
    GameState {
        player: Player {
            cooldown: state.player.cooldown.saturating_sub(1),
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire from the player's top centre.  No-op while the cooldown is running.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.player.cooldown > 0 {
        return state.clone();
    }
    let p = &state.player.rect;
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        rect: Rect::centered(p.center_x(), p.top(), BULLET_WIDTH, BULLET_HEIGHT),
        vy: -BULLET_SPEED,
        owner: BulletOwner::Player,
    });
    GameState {
        player: Player {
            cooldown: COOLDOWN_FRAMES,
            ..state.player.clone()
        },
        bullets,
        ..state.clone()
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Move every bullet by its velocity and drop those that left the playfield.
pub fn advance_bullets(state: &GameState) -> GameState {
    let bullets = state
        .bullets
        .iter()
        .map(|b| Bullet {
            rect: Rect { y: b.rect.y + b.vy, ..b.rect },
            ..b.clone()
        })
        .filter(|b| b.rect.top() >= -BULLET_MARGIN && b.rect.top() <= SCREEN_HEIGHT + BULLET_MARGIN)
        .collect();
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Formation ────────────────────────────────────────────────────────────────

/// March the alive enemies as one block.  If the projected move would breach
/// an edge margin, the block descends one step and reverses instead.
pub fn march_formation(state: &GameState) -> GameState {
    let alive = state.enemies.iter().filter(|e| e.alive);
    let Some((leftmost, rightmost)) = alive.fold(None, |acc: Option<(f32, f32)>, e| {
        Some(match acc {
            None => (e.rect.left(), e.rect.right()),
            Some((l, r)) => (l.min(e.rect.left()), r.max(e.rect.right())),
        })
    }) else {
        return state.clone();
    };

    let dx = state.direction * state.enemy_speed;
    let hit_edge = (state.direction > 0.0 && rightmost + dx >= SCREEN_WIDTH - EDGE_MARGIN)
        || (state.direction < 0.0 && leftmost + dx <= EDGE_MARGIN);

    let (shift_x, shift_y, direction) = if hit_edge {
        (0.0, ENEMY_DESCEND_STEP, -state.direction)
    } else {
        (dx, 0.0, state.direction)
    };

    let enemies = state
        .enemies
        .iter()
        .map(|e| {
            if !e.alive {
                return e.clone();
            }
            Enemy {
                rect: Rect {
                    x: e.rect.x + shift_x,
                    y: e.rect.y + shift_y,
                    ..e.rect
                },
                ..e.clone()
            }
        })
        .collect();

    GameState {
        enemies,
        direction,
        ..state.clone()
    }
}

/// With probability `ENEMY_FIRE_CHANCE`, a uniformly chosen alive enemy fires
/// from its bottom centre.
pub fn enemy_fire(state: &GameState, rng: &mut impl Rng) -> GameState {
    if !rng.gen_bool(ENEMY_FIRE_CHANCE) {
        return state.clone();
    }
    let alive: Vec<&Enemy> = state.enemies.iter().filter(|e| e.alive).collect();
    if alive.is_empty() {
        return state.clone();
    }
    let shooter = alive[rng.gen_range(0..alive.len())].rect;
    debug!("enemy fires from ({:.0}, {:.0})", shooter.center_x(), shooter.bottom());

    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        rect: Rect::centered(shooter.center_x(), shooter.bottom(), BULLET_WIDTH, BULLET_HEIGHT),
        vy: BULLET_SPEED,
        owner: BulletOwner::Enemy,
    });
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Resolve every hit for the frame.
///
/// Player bullets kill the first alive enemy they overlap (collection order)
/// and are spent.  Enemy bullets that overlap the player end the game, as does
/// any alive enemy whose lower edge reaches the player's upper edge.  Spent
/// bullets are marked during the pass and compacted afterwards.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut enemies = state.enemies.clone();
    let mut spent = vec![false; state.bullets.len()];
    let mut kills: u32 = 0;
    let mut player_hit = false;

    for (bi, bullet) in state.bullets.iter().enumerate() {
        match bullet.owner {
            BulletOwner::Player => {
                if let Some(enemy) = enemies
                    .iter_mut()
                    .find(|e| e.alive && collides(&bullet.rect, &e.rect))
                {
                    enemy.alive = false;
                    spent[bi] = true;
                    kills += 1;
                }
            }
            BulletOwner::Enemy => {
                if collides(&bullet.rect, &state.player.rect) {
                    spent[bi] = true;
                    player_hit = true;
                }
            }
        }
    }

    let overrun = enemies
        .iter()
        .any(|e| e.alive && e.rect.bottom() >= state.player.rect.top());

    let bullets = state
        .bullets
        .iter()
        .zip(&spent)
        .filter(|(_, &used)| !used)
        .map(|(b, _)| b.clone())
        .collect();

    let game_over = player_hit || overrun;
    if game_over {
        info!(
            "game over on wave {} with score {} ({})",
            state.wave,
            state.score + kills * KILL_SCORE,
            if player_hit { "player shot" } else { "formation landed" }
        );
    }

    GameState {
        enemies,
        bullets,
        score: state.score + kills * KILL_SCORE,
        status: if game_over { GameStatus::GameOver } else { state.status },
        won: if game_over { false } else { state.won },
        ..state.clone()
    }
}

// ── Wave lifecycle ───────────────────────────────────────────────────────────

/// Once no enemy is alive: award the clear bonus, then either win (when the
/// configured wave is reached) or start the next, faster wave from the top.
/// Outstanding bullets carry over.
///
/// Runs on every frame that began in play, so a wave cleared on the same frame
/// the player was hit still advances; the game stays lost.
pub fn check_wave_clear(state: &GameState) -> GameState {
    if state.enemies.iter().any(|e| e.alive) {
        return state.clone();
    }

    let score = state.score + WAVE_CLEAR_BONUS;
    if state.win_after_waves.is_some_and(|n| state.wave >= n) {
        let won = state.status == GameStatus::Playing;
        info!(
            "wave {} cleared, game {} with score {}",
            state.wave,
            if won { "won" } else { "lost" },
            score
        );
        return GameState {
            score,
            status: GameStatus::GameOver,
            won,
            ..state.clone()
        };
    }

    let wave = state.wave + 1;
    let enemy_speed = state.enemy_speed * WAVE_SPEED_GROWTH;
    info!("wave {} begins, formation speed {:.2}", wave, enemy_speed);
    GameState {
        enemies: spawn_wave(),
        enemy_speed,
        score,
        wave,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// While the game is over nothing moves; a restart input replaces the whole
/// state with a fresh game.
pub fn tick(state: &GameState, input: &Input, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        if input.restart {
            info!("restarting after score {}", state.score);
            return init_state(state.win_after_waves);
        }
        return state.clone();
    }

    // ── 1. Player movement, cooldown and shooting ────────────────────────────
    let mut next = move_player(state, input.dx);
    next = cool_down(&next);
    if input.shoot {
        next = player_shoot(&next);
    }

    // ── 2. Bullets travel and leave the playfield ────────────────────────────
    next = advance_bullets(&next);

    // ── 3. Formation march, then enemy fire ──────────────────────────────────
    next = march_formation(&next);
    next = enemy_fire(&next, rng);

    // ── 4. Hits and outcome ──────────────────────────────────────────────────
    next = resolve_collisions(&next);

    // ── 5. Wave lifecycle (the frame began in play, even if it ended the game) ──
    check_wave_clear(&next)
}
