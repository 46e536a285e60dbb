//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands, scaling playfield pixels onto the cell
//! grid inside the border.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::{alive_count, banner};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{Bullet, BulletOwner, Enemy, GameState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_WAVE: Color = Color::Cyan;
const C_HUD_ALIVE: Color = Color::Red;
const C_PLAYER: Color = Color::Cyan;
const C_ENEMY: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal size in cells.  Row 0 is the HUD, row 1 and `rows - 2` are the
/// border bars, the last row holds the controls hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    fn inner_cols(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn inner_rows(&self) -> u16 {
        self.rows.saturating_sub(4).max(1)
    }

    /// Map a playfield point onto a cell inside the border.  Terminals too
    /// small to fit the border still get a cell on screen.
    pub fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let fx = (x / SCREEN_WIDTH).clamp(0.0, 1.0);
        let fy = (y / SCREEN_HEIGHT).clamp(0.0, 1.0);
        let col = ((fx * self.inner_cols() as f32) as u16).min(self.inner_cols() - 1);
        let row = ((fy * self.inner_rows() as f32) as u16).min(self.inner_rows() - 1);
        (
            (1 + col).min(self.cols.saturating_sub(1)),
            (2 + row).min(self.rows.saturating_sub(1)),
        )
    }

    /// Last row still inside the playfield.
    fn play_bottom(&self) -> u16 {
        2 + self.inner_rows() - 1
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        draw_enemy(out, enemy, view)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet, view)?;
    }

    draw_player(out, state, view)?;
    draw_controls_hint(out, view)?;

    if let Some(headline) = banner(state) {
        draw_game_over(out, state, headline, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", state.score)))?;

    // Wave — centre
    let wave_str = format!("[ WAVE {} ]", state.wave);
    let wx = (view.cols / 2).saturating_sub(wave_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_str))?;

    // Enemies left — right
    let alive_text = format!("Invaders: {:>2}", alive_count(state));
    let rx = view
        .cols
        .saturating_sub(alive_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ALIVE))?;
    out.queue(Print(&alive_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← gun, at the top edge
    //  /█\      ← hull, one row down
    let p = &state.player.rect;
    let (col, row) = view.to_cell(p.center_x(), p.top());
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;

    if row < view.play_bottom() {
        let lx = col.saturating_sub(1).clamp(1, view.cols.saturating_sub(4).max(1));
        out.queue(cursor::MoveTo(lx, row + 1))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: Viewport) -> std::io::Result<()> {
    // <▼>
    let (col, row) = view.to_cell(enemy.rect.center_x(), enemy.rect.center_y());
    let lx = col.saturating_sub(1).clamp(1, view.cols.saturating_sub(4).max(1));
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print("<▼>"))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet, view: Viewport) -> std::io::Result<()> {
    // Culling keeps bullets up to a margin past the edges; those are not drawn.
    let top = bullet.rect.top();
    if top < 0.0 || top > SCREEN_HEIGHT {
        return Ok(());
    }
    let (col, row) = view.to_cell(bullet.rect.center_x(), bullet.rect.center_y());
    out.queue(cursor::MoveTo(col, row))?;
    match bullet.owner {
        BulletOwner::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        BulletOwner::Enemy => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE / K : Shoot   ESC : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    headline: &str,
    view: Viewport,
) -> std::io::Result<()> {
    let title = format!("║ {:^16} ║", headline);
    let score_line = format!("Final Score: {}", state.score);
    let wave_line = format!("Reached wave {}", state.wave);
    let colour = if state.won { Color::Green } else { Color::Red };
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", colour),
        (&title,                 colour),
        ("╚══════════════════╝", colour),
        (&score_line,            Color::Yellow),
        (&wave_line,             Color::Yellow),
        ("R - Play Again  ESC - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
