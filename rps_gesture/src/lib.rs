//! # rps_gesture
//!
//! Hand poses (21 normalized landmarks per hand) and the rule-based
//! classifier that turns one pose into a Rock-Paper-Scissors [`Gesture`].
//!
//! Landmark detection itself is somebody else's job: this crate starts from
//! the keypoints a hand-landmark model (MediaPipe ordering) already produced.
//!
//! ## Classification rules
//!
//! Evaluated top to bottom, first match wins.  "Up" for a finger means its
//! tip sits above its base knuckle in image space (`y` grows downward).
//!
//! | # | Thumb | Index | Middle | Ring | Pinky | Gesture |
//! |---|---|---|---|---|---|---|
//! | 1 | up (and near-vertical) | folded | folded | folded | folded | `ThumbUp` |
//! | 2 | not up | – | – | – | – | `Rock` |
//! | 3 | up | up | up | up | up | `Paper` |
//! | 4 | tip above base | up | up | folded | folded | `Scissors` |
//! | 5 | up | folded | folded | folded | up | `Special` |
//! | 6 | – | – | – | – | – | `None` |
//!
//! ## Quick start
//!
//! ```rust
//! use rps_gesture::{classify, Gesture, PoseBuilder};
//!
//! let pose = PoseBuilder::new(Gesture::Scissors).anchored_at(0.3, 0.4).build();
//! assert_eq!(classify(&pose), Gesture::Scissors);
//! ```

pub mod landmark;
pub mod gesture;
pub mod synthetic;

pub use landmark::{idx, Landmark, HandPose, PoseError, HAND_CONNECTIONS, LANDMARK_COUNT};
pub use gesture::{Gesture, Thresholds, classify, classify_with, THUMB_MAX_DX};
pub use synthetic::PoseBuilder;
