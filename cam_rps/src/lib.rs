//! # cam_rps
//!
//! The presentation loop around [`rps_game`]: landmark frames come in from
//! a source thread, every hand is classified with [`rps_gesture`], the round
//! state machine is ticked once per rendered frame, and the returned view is
//! drawn into a `minifb` window.
//!
//! ## Landmark sources
//!
//! | `--source` | Where hands come from |
//! |---|---|
//! | `sim` (default) | Keyboard + mouse: synthetic hand follows the mouse |
//! | `detector` | A detector command (after `--`) printing one JSON frame per line |
//! | `stdin` | The same JSON-lines frames, piped into stdin |
//!
//! ### Simulation keys
//!
//! | Key | Hand shows |
//! |---|---|
//! | `T` | Thumb-Up (starts a round) |
//! | `R` / `P` / `S` | Rock / Paper / Scissors |
//! | `C` | COWABUNGA (the wildcard) |
//! | `N` | an unrecognisable sign |
//! | `H` | hide / show the hand |
//! | `Q` / `Esc` | quit |
//!
//! Move the mouse onto the Reset button to start over.
//!
//! ### Detector frame format
//!
//! ```json
//! {"hands": [{"handedness": "Right", "score": 0.93,
//!             "landmarks": [{"x": 0.51, "y": 0.80, "z": 0.0}, ...21 points]}]}
//! ```

pub mod config;
pub mod source;
pub mod visualizer;
pub mod app;
