//! Application configuration: one JSON file, every section optional.
//!
//! ```json
//! {
//!   "window":     { "width": 1280, "height": 720 },
//!   "game":       { "countdown_secs": 3 },
//!   "thresholds": { "thumb_max_dx": 0.12 },
//!   "detector":   { "command": ["python3", "hand_detect.py"], "min_confidence": 0.8, "mirror": true }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rps_game::{FrameSize, GameConfig};
use rps_gesture::Thresholds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {}", .path.display(), .source)]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {}", .path.display(), .source)]
    Parse {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ════════════════════════════════════════════════════════════════════════════
// Sections
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width:  usize,
    pub height: usize,
    pub title:  String,
    /// Render-loop rate cap.
    pub fps:    u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width:  960,
            height: 720,
            title:  "Rock, Paper, Scissors Game".to_string(),
            fps:    60,
        }
    }
}

/// External landmark detector (the `detector` / `stdin` sources).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Program and arguments; its stdout carries JSON frames.
    pub command:        Vec<String>,
    /// Hands scored below this are ignored.
    pub min_confidence: f32,
    /// Flip x so the view behaves like a mirror.
    pub mirror:         bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            command:        Vec::new(),
            min_confidence: 0.8,
            mirror:         false,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window:     WindowConfig,
    pub game:       GameConfig,
    pub thresholds: Thresholds,
    pub detector:   DetectorConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn frame(&self) -> FrameSize {
        FrameSize::new(self.window.width, self.window.height)
    }
}
