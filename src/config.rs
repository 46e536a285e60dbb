//! Startup settings
//!
//! Read once from the environment when the binary starts. Gameplay tuning
//! lives in `consts`; these only cover what differs between runs.

use std::path::PathBuf;

pub const SEED_VAR: &str = "INVADERS_SEED";
pub const LOG_VAR: &str = "INVADERS_LOG";
pub const WIN_AFTER_VAR: &str = "INVADERS_WIN_AFTER";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Fixed RNG seed for reproducible enemy fire; entropy when unset.
    pub seed: Option<u64>,
    /// Log file. Logging is disabled when unset since stderr shares the terminal.
    pub log_path: Option<PathBuf>,
    /// Clearing this wave wins the game. Unset means endless waves.
    pub win_after_waves: Option<u32>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Values that fail to parse are
    /// reported on stderr and left at their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup(SEED_VAR).and_then(|v| parse_var(SEED_VAR, &v));
        let log_path = lookup(LOG_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let win_after_waves = lookup(WIN_AFTER_VAR)
            .and_then(|v| parse_var::<u32>(WIN_AFTER_VAR, &v))
            .filter(|&n| n > 0);

        Settings {
            seed,
            log_path,
            win_after_waves,
        }
    }
}

// Runs before the logger exists and before the terminal enters raw mode.
fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("ignoring {}={:?}: not a valid number", key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings_from(&[]), Settings::default());
    }

    #[test]
    fn parses_all_values() {
        let s = settings_from(&[
            (SEED_VAR, "42"),
            (LOG_VAR, "/tmp/invaders.log"),
            (WIN_AFTER_VAR, " 3 "),
        ]);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.log_path, Some(PathBuf::from("/tmp/invaders.log")));
        assert_eq!(s.win_after_waves, Some(3));
    }

    #[test]
    fn bad_numbers_fall_back_to_default() {
        let s = settings_from(&[(SEED_VAR, "abc"), (WIN_AFTER_VAR, "-1")]);
        assert_eq!(s.seed, None);
        assert_eq!(s.win_after_waves, None);
    }

    #[test]
    fn zero_waves_means_no_win_rule() {
        let s = settings_from(&[(WIN_AFTER_VAR, "0")]);
        assert_eq!(s.win_after_waves, None);
    }

    #[test]
    fn blank_log_path_is_ignored() {
        let s = settings_from(&[(LOG_VAR, "   ")]);
        assert_eq!(s.log_path, None);
    }
}
