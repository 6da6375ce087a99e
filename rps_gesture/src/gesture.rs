//! Gesture labels and the rule-based classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::landmark::{idx, HandPose};

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// What a single hand is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Thumb raised, fist closed: the "start" sign.
    ThumbUp,
    Rock,
    Paper,
    Scissors,
    /// Pinky and thumb out ("COWABUNGA"): the wildcard that beats the
    /// three standard signs.
    Special,
    /// No recognizable sign.
    None,
}

impl Gesture {
    /// The three signs the computer may throw.
    pub const STANDARD: [Gesture; 3] = [Gesture::Rock, Gesture::Paper, Gesture::Scissors];

    pub const ALL: [Gesture; 6] = [
        Gesture::ThumbUp,
        Gesture::Rock,
        Gesture::Paper,
        Gesture::Scissors,
        Gesture::Special,
        Gesture::None,
    ];

    pub fn is_standard(self) -> bool {
        Self::STANDARD.contains(&self)
    }

    /// Display name shown to the player.
    pub fn name(self) -> &'static str {
        match self {
            Gesture::ThumbUp  => "Thumb-Up",
            Gesture::Rock     => "Rock",
            Gesture::Paper    => "Paper",
            Gesture::Scissors => "Scissors",
            Gesture::Special  => "COWABUNGA",
            Gesture::None     => "None",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Thresholds
// ════════════════════════════════════════════════════════════════════════════

/// Maximum horizontal tip-to-base distance (normalized) for the thumb to
/// count as raised rather than splayed sideways.
pub const THUMB_MAX_DX: f32 = 0.1;

/// Tunable geometry for [`classify_with`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub thumb_max_dx: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds { thumb_max_dx: THUMB_MAX_DX }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger state
// ════════════════════════════════════════════════════════════════════════════

/// Extended / folded per finger.  The two are not complements: a tip level
/// with its base is neither.
#[derive(Clone, Copy, Debug)]
struct Finger {
    extended: bool,
    folded:   bool,
}

impl Finger {
    fn of(pose: &HandPose, tip: usize, base: usize) -> Self {
        let (t, b) = (pose.at(tip).y, pose.at(base).y);
        Finger { extended: t < b, folded: t > b }
    }
}

struct Hand {
    thumb_up:    bool,
    thumb_above: bool,
    index:  Finger,
    middle: Finger,
    ring:   Finger,
    pinky:  Finger,
}

impl Hand {
    fn read(pose: &HandPose, t: &Thresholds) -> Self {
        let tip  = pose.at(idx::THUMB_TIP);
        let base = pose.at(idx::THUMB_BASE);
        let thumb_above = tip.y < base.y;
        Hand {
            thumb_up: thumb_above && (tip.x - base.x).abs() < t.thumb_max_dx,
            thumb_above,
            index:  Finger::of(pose, idx::INDEX_TIP,  idx::INDEX_MCP),
            middle: Finger::of(pose, idx::MIDDLE_TIP, idx::MIDDLE_MCP),
            ring:   Finger::of(pose, idx::RING_TIP,   idx::RING_MCP),
            pinky:  Finger::of(pose, idx::PINKY_TIP,  idx::PINKY_MCP),
        }
    }

    fn all_folded(&self) -> bool {
        self.index.folded && self.middle.folded && self.ring.folded && self.pinky.folded
    }

    fn all_extended(&self) -> bool {
        self.index.extended && self.middle.extended && self.ring.extended && self.pinky.extended
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one hand with the default [`Thresholds`].
pub fn classify(pose: &HandPose) -> Gesture {
    classify_with(pose, &Thresholds::default())
}

/// Classify one hand.  Pure and total; the rule order is significant.
///
/// Note that any pose whose thumb fails the "raised" test comes out as
/// [`Gesture::Rock`], whatever the other four fingers are doing.
pub fn classify_with(pose: &HandPose, thresholds: &Thresholds) -> Gesture {
    let h = Hand::read(pose, thresholds);

    if h.thumb_up && h.all_folded() {
        return Gesture::ThumbUp;
    }
    if !h.thumb_up {
        return Gesture::Rock;
    }
    if h.all_extended() {
        return Gesture::Paper;
    }
    if h.index.extended && h.middle.extended && h.ring.folded && h.pinky.folded && h.thumb_above {
        return Gesture::Scissors;
    }
    if h.index.folded && h.middle.folded && h.ring.folded && h.pinky.extended {
        return Gesture::Special;
    }
    Gesture::None
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, LANDMARK_COUNT};

    const UP:   f32 = 0.30;   // tip y for an extended finger
    const DOWN: f32 = 0.70;   // tip y for a folded finger
    const BASE: f32 = 0.50;   // every finger's base knuckle

    /// Hand-assembled pose: thumb tip offset from a base at (0.4, 0.6),
    /// then index/middle/ring/pinky tip heights.
    fn pose(thumb_dx: f32, thumb_dy: f32, tips: [f32; 4]) -> HandPose {
        let mut lm = [Landmark::new(0.5, 0.8); LANDMARK_COUNT];
        lm[idx::THUMB_BASE] = Landmark::new(0.4, 0.6);
        lm[idx::THUMB_TIP]  = Landmark::new(0.4 + thumb_dx, 0.6 + thumb_dy);
        let fingers = [
            (idx::INDEX_MCP,  idx::INDEX_TIP),
            (idx::MIDDLE_MCP, idx::MIDDLE_TIP),
            (idx::RING_MCP,   idx::RING_TIP),
            (idx::PINKY_MCP,  idx::PINKY_TIP),
        ];
        for (i, (base, tip)) in fingers.into_iter().enumerate() {
            let x = 0.45 + i as f32 * 0.05;
            lm[base] = Landmark::new(x, BASE);
            lm[tip]  = Landmark::new(x, tips[i]);
        }
        HandPose::new(lm)
    }

    fn thumb_up(tips: [f32; 4]) -> HandPose { pose(0.02, -0.2, tips) }

    #[test]
    fn thumb_up_with_closed_fist() {
        assert_eq!(classify(&thumb_up([DOWN; 4])), Gesture::ThumbUp);
    }

    #[test]
    fn thumb_up_wherever_the_hand_is() {
        let base = thumb_up([DOWN; 4]);
        for dx in [-0.3, -0.1, 0.0, 0.2] {
            for dy in [-0.2, 0.0, 0.15] {
                assert_eq!(classify(&base.translated(dx, dy)), Gesture::ThumbUp);
            }
        }
    }

    #[test]
    fn paper_scissors_special() {
        assert_eq!(classify(&thumb_up([UP; 4])), Gesture::Paper);
        assert_eq!(classify(&thumb_up([UP, UP, DOWN, DOWN])), Gesture::Scissors);
        assert_eq!(classify(&thumb_up([DOWN, DOWN, DOWN, UP])), Gesture::Special);
    }

    #[test]
    fn unmatched_raised_thumb_is_none() {
        assert_eq!(classify(&thumb_up([UP, DOWN, DOWN, DOWN])), Gesture::None);
        assert_eq!(classify(&thumb_up([UP, UP, UP, DOWN])), Gesture::None);
    }

    #[test]
    fn lowered_thumb_is_rock() {
        assert_eq!(classify(&pose(0.0, 0.1, [DOWN; 4])), Gesture::Rock);
    }

    #[test]
    fn splayed_thumb_falls_back_to_rock() {
        // An open hand with the thumb out sideways still reads as Rock.
        assert_eq!(classify(&pose(-0.15, -0.05, [UP; 4])), Gesture::Rock);
        assert_eq!(classify(&pose(0.12, -0.2, [UP, UP, DOWN, DOWN])), Gesture::Rock);
    }

    #[test]
    fn thumb_dx_limit_is_tunable() {
        let p = pose(0.15, -0.2, [DOWN; 4]);
        let loose = Thresholds { thumb_max_dx: 0.2 };
        assert_eq!(classify_with(&p, &Thresholds::default()), Gesture::Rock);
        assert_eq!(classify_with(&p, &loose), Gesture::ThumbUp);
    }

    #[test]
    fn level_fingertip_is_neither_extended_nor_folded() {
        // Pinky level with its knuckle: not a fist, not a COWABUNGA.
        assert_eq!(classify(&thumb_up([DOWN, DOWN, DOWN, BASE])), Gesture::None);
    }

    #[test]
    fn classify_is_deterministic() {
        let poses = [
            thumb_up([DOWN; 4]),
            thumb_up([UP; 4]),
            thumb_up([UP, UP, DOWN, DOWN]),
            pose(-0.3, 0.0, [UP; 4]),
        ];
        for p in &poses {
            let first = classify(p);
            for _ in 0..10 {
                assert_eq!(classify(p), first);
            }
        }
    }

    #[test]
    fn names_match_display() {
        for g in Gesture::ALL {
            assert_eq!(g.to_string(), g.name());
        }
        assert_eq!(Gesture::Special.to_string(), "COWABUNGA");
        assert_eq!(Gesture::ThumbUp.to_string(), "Thumb-Up");
    }

    #[test]
    fn standard_set() {
        let standard: Vec<_> = Gesture::ALL.into_iter().filter(|g| g.is_standard()).collect();
        assert_eq!(standard, Gesture::STANDARD.to_vec());
    }
}
