use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use invaders::compute::{init_state, tick};
use invaders::config::Settings;
use invaders::consts::FPS;
use invaders::display::{self, Viewport};
use invaders::entities::{GameState, GameStatus, Input};

const FRAME: Duration = Duration::from_micros(1_000_000 / FPS);

/// On terminals without key-release events, a key is considered "held" if its
/// last press/repeat event arrived within this many frames (≈133 ms).  Holding
/// a key there stutters through the OS repeat delay; release-capable terminals
/// never expire keys.
const HOLD_WINDOW: u64 = 8;

const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const SHOOT_KEYS: &[KeyCode] = &[KeyCode::Char(' '), KeyCode::Char('k'), KeyCode::Char('K')];

/// Returns true if any of `keys` is held.  With `releases_reported` a key stays
/// held until its release event removes it from `key_frame`; otherwise it must
/// have been seen within the last `HOLD_WINDOW` frames.
fn any_held(
    key_frame: &HashMap<KeyCode, u64>,
    keys: &[KeyCode],
    frame: u64,
    releases_reported: bool,
) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| releases_reported || frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// stderr shares the screen with the game, so log lines go to a file or nowhere.
fn init_logging(settings: &Settings) {
    let Some(path) = &settings.log_path else {
        return;
    };
    match File::create(path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("cannot open log file {}: {}", path.display(), e),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still held and
/// hand the result to the simulation as one `Input`.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys stay held from press until
///   release, with no expiry.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    releases_reported: bool,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut restart = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            restart = true;
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = Input::from_keys(
            any_held(&key_frame, LEFT_KEYS, frame, releases_reported),
            any_held(&key_frame, RIGHT_KEYS, frame, releases_reported),
            any_held(&key_frame, SHOOT_KEYS, frame, releases_reported),
            restart,
        );
        *state = tick(state, &input, rng);

        let (cols, rows) = terminal::size()?;
        display::render(out, state, Viewport::new(cols, rows))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings);

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("starting with {:?}", settings);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    // Writing the flags succeeds on any terminal; ask whether they took effect.
    // Must run before the reader thread starts consuming stdin.
    let releases_reported =
        keyboard_enhanced && terminal::supports_keyboard_enhancement().unwrap_or(false);
    log::info!("key release events: {}", releases_reported);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut state = init_state(settings.win_after_waves);
    let result = game_loop(&mut out, &mut state, &rx, &mut rng, releases_reported);
    log::info!("quit on wave {} with score {}", state.wave, state.score);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
