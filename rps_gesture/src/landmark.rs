//! Landmarks and hand poses.
//!
//! A [`HandPose`] is always exactly [`LANDMARK_COUNT`] landmarks; the fixed
//! array makes the count part of the type.  The only fallible step is
//! building one from a dynamically-sized list coming off the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of keypoints per hand in the MediaPipe hand model.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Anatomical indices
// ════════════════════════════════════════════════════════════════════════════

/// Landmark indices (MediaPipe hand landmark convention).
pub mod idx {
    pub const WRIST:      usize = 0;
    pub const THUMB_CMC:  usize = 1;
    pub const THUMB_MCP:  usize = 2;
    pub const THUMB_IP:   usize = 3;
    pub const THUMB_TIP:  usize = 4;
    pub const INDEX_MCP:  usize = 5;
    pub const INDEX_PIP:  usize = 6;
    pub const INDEX_DIP:  usize = 7;
    pub const INDEX_TIP:  usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP:   usize = 13;
    pub const RING_PIP:   usize = 14;
    pub const RING_DIP:   usize = 15;
    pub const RING_TIP:   usize = 16;
    pub const PINKY_MCP:  usize = 17;
    pub const PINKY_PIP:  usize = 18;
    pub const PINKY_DIP:  usize = 19;
    pub const PINKY_TIP:  usize = 20;

    /// The landmark treated as the thumb's base by the classifier.
    pub const THUMB_BASE: usize = THUMB_CMC;
}

/// Skeleton edges between landmark indices, for drawing a detected hand.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // palm
    (0, 1), (0, 5), (5, 9), (9, 13), (13, 17), (0, 17),
    // thumb
    (1, 2), (2, 3), (3, 4),
    // index
    (5, 6), (6, 7), (7, 8),
    // middle
    (9, 10), (10, 11), (11, 12),
    // ring
    (13, 14), (14, 15), (15, 16),
    // pinky
    (17, 18), (18, 19), (19, 20),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One keypoint, normalized to the frame: `x`, `y` in `[0, 1]`, `y` down.
/// `z` is depth relative to the wrist and is carried but never classified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandPose
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoseError {
    #[error("expected 21 landmarks, got {0}")]
    LandmarkCount(usize),
}

/// The 21 landmarks of one detected hand, in anatomical order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        HandPose { landmarks }
    }

    /// Build from a list of unknown length.  Anything other than exactly
    /// 21 points violates the detector contract.
    pub fn from_landmarks<I>(points: I) -> Result<Self, PoseError>
    where
        I: IntoIterator<Item = Landmark>,
    {
        let points: Vec<Landmark> = points.into_iter().collect();
        let landmarks: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|v: Vec<Landmark>| PoseError::LandmarkCount(v.len()))?;
        Ok(HandPose { landmarks })
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] { &self.landmarks }

    /// Landmark at an anatomical index (see [`idx`]).
    pub fn at(&self, index: usize) -> Landmark { self.landmarks[index] }

    pub fn index_tip(&self) -> Landmark { self.at(idx::INDEX_TIP) }

    /// True when every `x` and `y` is finite and no further than `margin`
    /// outside the unit square.  Detectors report points slightly off-frame
    /// for a partly visible hand; anything beyond that is garbage.
    pub fn within_frame(&self, margin: f32) -> bool {
        let (lo, hi) = (-margin, 1.0 + margin);
        self.landmarks
            .iter()
            .all(|lm| lm.x.is_finite() && lm.y.is_finite()
                && (lo..=hi).contains(&lm.x) && (lo..=hi).contains(&lm.y))
    }

    /// The same hand shifted by `(dx, dy)` in normalized units.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let mut landmarks = self.landmarks;
        for lm in landmarks.iter_mut() {
            lm.x += dx;
            lm.y += dy;
        }
        HandPose { landmarks }
    }

    /// Mirror horizontally (`x → 1 - x`), as for a selfie-view camera.
    pub fn mirrored(&self) -> Self {
        let mut landmarks = self.landmarks;
        for lm in landmarks.iter_mut() {
            lm.x = 1.0 - lm.x;
        }
        HandPose { landmarks }
    }

    /// Position of landmark `index` in pixels for a `width` × `height` frame.
    pub fn to_pixels(&self, index: usize, width: usize, height: usize) -> (f32, f32) {
        let lm = self.at(index);
        (lm.x * width as f32, lm.y * height as f32)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize) -> Vec<Landmark> {
        (0..n).map(|i| Landmark::new(i as f32 / 100.0, 0.5)).collect()
    }

    #[test]
    fn from_landmarks_accepts_21() {
        let pose = HandPose::from_landmarks(row(21)).unwrap();
        assert_eq!(pose.at(idx::INDEX_TIP).x, 0.08);
    }

    #[test]
    fn from_landmarks_rejects_wrong_count() {
        assert_eq!(HandPose::from_landmarks(row(20)), Err(PoseError::LandmarkCount(20)));
        assert_eq!(HandPose::from_landmarks(row(22)), Err(PoseError::LandmarkCount(22)));
        assert_eq!(HandPose::from_landmarks(Vec::new()), Err(PoseError::LandmarkCount(0)));
    }

    #[test]
    fn pose_error_message() {
        assert_eq!(PoseError::LandmarkCount(3).to_string(), "expected 21 landmarks, got 3");
    }

    #[test]
    fn mirror_flips_x_only() {
        let pose = HandPose::from_landmarks(row(21)).unwrap().mirrored();
        assert!((pose.at(idx::PINKY_TIP).x - 0.8).abs() < 1e-6);
        assert_eq!(pose.at(idx::PINKY_TIP).y, 0.5);
    }

    #[test]
    fn translate_moves_every_point() {
        let pose = HandPose::from_landmarks(row(21)).unwrap();
        let moved = pose.translated(0.1, -0.2);
        for (a, b) in pose.landmarks().iter().zip(moved.landmarks().iter()) {
            assert!((b.x - a.x - 0.1).abs() < 1e-6);
            assert!((b.y - a.y + 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn pixels_scale_by_frame() {
        let pose = HandPose::from_landmarks(row(21)).unwrap();
        let (x, y) = pose.to_pixels(idx::WRIST, 640, 480);
        assert_eq!((x, y), (0.0, 240.0));
    }

    #[test]
    fn within_frame_rejects_far_and_non_finite_points() {
        let pose = HandPose::from_landmarks(row(21)).unwrap();
        assert!(pose.within_frame(0.0));
        assert!(pose.translated(-0.3, 0.0).within_frame(0.5));
        assert!(!pose.translated(-0.3, 0.0).within_frame(0.1));

        let mut far = *pose.landmarks();
        far[idx::INDEX_TIP].x = 1.0e7;
        assert!(!HandPose::new(far).within_frame(0.5));

        let mut nan = *pose.landmarks();
        nan[idx::WRIST].y = f32::NAN;
        assert!(!HandPose::new(nan).within_frame(0.5));
    }

    #[test]
    fn connections_stay_in_range() {
        for &(a, b) in HAND_CONNECTIONS.iter() {
            assert!(a < LANDMARK_COUNT && b < LANDMARK_COUNT);
        }
    }

    #[test]
    fn landmark_z_defaults_when_absent() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
        assert_eq!(lm, Landmark::new(0.25, 0.75));
    }
}
