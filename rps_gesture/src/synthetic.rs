//! Synthetic hand poses.
//!
//! Stand-ins for a real landmark detector: the keyboard simulator and the
//! tests both need well-formed hands that show a chosen sign.

use crate::gesture::Gesture;
use crate::landmark::{idx, HandPose, Landmark, LANDMARK_COUNT};

// ── neutral hand geometry (normalized, centred in the frame) ──────────────

const WRIST:         (f32, f32) = (0.50, 0.85);
const THUMB_BASE:    (f32, f32) = (0.40, 0.78);
const KNUCKLE_Y:     f32 = 0.62;
const EXTENDED_TIP:  f32 = 0.36;
const FOLDED_TIP:    f32 = 0.70;

/// (MCP index, x) for index, middle, ring, pinky.
const FINGERS: [(usize, f32); 4] = [
    (idx::INDEX_MCP,  0.42),
    (idx::MIDDLE_MCP, 0.48),
    (idx::RING_MCP,   0.54),
    (idx::PINKY_MCP,  0.60),
];

/// Builds a [`HandPose`] that classifies as the requested [`Gesture`].
#[derive(Clone, Copy, Debug)]
pub struct PoseBuilder {
    gesture: Gesture,
    anchor:  Option<(f32, f32)>,
}

impl PoseBuilder {
    pub fn new(gesture: Gesture) -> Self {
        PoseBuilder { gesture, anchor: None }
    }

    /// Move the whole hand so its index fingertip sits at `(x, y)`
    /// (normalized).  Points may end up outside `[0, 1]`; nothing is clamped.
    pub fn anchored_at(mut self, x: f32, y: f32) -> Self {
        self.anchor = Some((x, y));
        self
    }

    pub fn build(&self) -> HandPose {
        // thumb raised?  index, middle, ring, pinky extended?
        let (thumb_up, fingers) = match self.gesture {
            Gesture::ThumbUp  => (true,  [false, false, false, false]),
            Gesture::Rock     => (false, [false, false, false, false]),
            Gesture::Paper    => (true,  [true,  true,  true,  true ]),
            Gesture::Scissors => (true,  [true,  true,  false, false]),
            Gesture::Special  => (true,  [false, false, false, true ]),
            Gesture::None     => (true,  [true,  false, false, false]),
        };

        let mut lm = [Landmark::new(WRIST.0, WRIST.1); LANDMARK_COUNT];
        lm[idx::THUMB_CMC] = Landmark::new(THUMB_BASE.0, THUMB_BASE.1);
        let thumb = if thumb_up {
            [(0.39, 0.70), (0.395, 0.62), (0.40, 0.54)]
        } else {
            [(0.34, 0.76), (0.29, 0.75), (0.24, 0.74)]
        };
        for (k, (x, y)) in thumb.into_iter().enumerate() {
            lm[idx::THUMB_MCP + k] = Landmark::new(x, y);
        }

        for ((mcp, x), extended) in FINGERS.into_iter().zip(fingers) {
            let joints = if extended {
                let step = (EXTENDED_TIP - KNUCKLE_Y) / 3.0;
                [KNUCKLE_Y + step, KNUCKLE_Y + 2.0 * step, EXTENDED_TIP]
            } else {
                [0.54, 0.60, FOLDED_TIP]
            };
            lm[mcp] = Landmark::new(x, KNUCKLE_Y);
            for (k, y) in joints.into_iter().enumerate() {
                lm[mcp + 1 + k] = Landmark::new(x, y);
            }
        }

        let pose = HandPose::new(lm);
        match self.anchor {
            Some((x, y)) => {
                let tip = pose.index_tip();
                pose.translated(x - tip.x, y - tip.y)
            }
            None => pose,
        }
    }
}
