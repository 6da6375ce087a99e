//! Game tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::layout::ResetButton;

pub const DEFAULT_COUNTDOWN_SECS: f64 = 4.0;

/// Longest countdown accepted from a config file: one hour.
pub const MAX_COUNTDOWN_SECS: f64 = 3600.0;

/// Everything about a round that isn't decided by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds between the start sign and the recognition window.
    pub countdown_secs: f64,
    pub reset_button:   ResetButton,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            reset_button:   ResetButton::default(),
        }
    }
}

impl GameConfig {
    /// Countdown length.  Negative or NaN values collapse to zero; values
    /// above [`MAX_COUNTDOWN_SECS`] fall back to the default.
    pub fn countdown(&self) -> Duration {
        let secs = self.countdown_secs.max(0.0);
        if secs > MAX_COUNTDOWN_SECS {
            return Duration::from_secs_f64(DEFAULT_COUNTDOWN_SECS);
        }
        Duration::from_secs_f64(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_four_seconds() {
        assert_eq!(GameConfig::default().countdown(), Duration::from_secs(4));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{"countdown_secs": 2.5}"#).unwrap();
        assert_eq!(cfg.countdown(), Duration::from_millis(2500));
        assert_eq!(cfg.reset_button, ResetButton::default());

        let cfg: GameConfig = serde_json::from_str(r#"{"reset_button": {"width": 200}}"#).unwrap();
        assert_eq!(cfg.reset_button.width, 200.0);
        assert_eq!(cfg.reset_button.height, 50.0);
        assert_eq!(cfg.countdown_secs, DEFAULT_COUNTDOWN_SECS);
    }

    #[test]
    fn nonsense_countdown_is_clamped() {
        let neg = GameConfig { countdown_secs: -3.0, ..GameConfig::default() };
        assert_eq!(neg.countdown(), Duration::ZERO);
        let nan = GameConfig { countdown_secs: f64::NAN, ..GameConfig::default() };
        assert_eq!(nan.countdown(), Duration::ZERO);
        let huge = GameConfig { countdown_secs: 1e300, ..GameConfig::default() };
        assert_eq!(huge.countdown(), Duration::from_secs(4));
        let inf = GameConfig { countdown_secs: f64::INFINITY, ..GameConfig::default() };
        assert_eq!(inf.countdown(), Duration::from_secs(4));
    }

    #[test]
    fn countdown_is_capped_at_an_hour() {
        let hour = GameConfig { countdown_secs: MAX_COUNTDOWN_SECS, ..GameConfig::default() };
        assert_eq!(hour.countdown(), Duration::from_secs(3600));

        // Past the cap, even values a `Duration` could hold fall back.
        let cfg: GameConfig = serde_json::from_str(r#"{"countdown_secs": 1e19}"#).unwrap();
        assert_eq!(cfg.countdown(), Duration::from_secs(4));
    }
}
