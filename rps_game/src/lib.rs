//! # rps_game
//!
//! The round state machine for gesture Rock-Paper-Scissors.
//!
//! The caller owns the frame loop: once per frame it classifies every visible
//! hand, then calls [`GameStateMachine::tick`] with those gestures, the
//! pointer (index fingertip, in frame pixels) and the current time.  The
//! returned [`ViewModel`] says what to draw.  Time is never read internally,
//! so a round can be replayed in a test without sleeping.
//!
//! ## Phases
//!
//! | Phase | Leaves when | Goes to |
//! |---|---|---|
//! | `WaitingForStart` | any hand shows Thumb-Up | `Countdown` (computer throws now) |
//! | `Countdown` | the countdown deadline passes | `GestureRecognition` |
//! | `GestureRecognition` | a hand shows anything but `None` | `ShowResult` |
//! | `ShowResult` | the pointer enters the Reset button | `WaitingForStart` |
//!
//! ## Quick start
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use rps_game::{GameConfig, GameStateMachine, GamePhase, FrameSize};
//! use rps_gesture::Gesture;
//!
//! let mut game = GameStateMachine::with_opponent(
//!     GameConfig::default(),
//!     FrameSize::new(640, 480),
//!     || Gesture::Rock,
//! );
//! let t0 = Instant::now();
//! game.tick(&[Gesture::ThumbUp], None, t0);
//! game.tick(&[], None, t0 + Duration::from_secs(4));
//! game.tick(&[Gesture::Paper], None, t0 + Duration::from_secs(5));
//! assert_eq!(game.phase(), GamePhase::ShowResult);
//! assert_eq!(game.session().result_message(), Some("You win!"));
//! ```

pub mod rules;
pub mod layout;
pub mod opponent;
pub mod config;
pub mod machine;

pub use rules::{Outcome, determine_winner, beats};
pub use layout::{Point, Rect, FrameSize, ResetButton};
pub use opponent::{Opponent, RandomOpponent};
pub use config::GameConfig;
pub use machine::{GamePhase, Session, ViewModel, GameStateMachine, START_PROMPT};
