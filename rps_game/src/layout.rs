//! Frame geometry: pointer, rectangles, and where the Reset button lives.

use serde::{Deserialize, Serialize};

/// A position in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self { Point { x, y } }
}

/// Axis-aligned rectangle in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x:      f32,
    pub y:      f32,
    pub width:  f32,
    pub height: f32,
}

impl Rect {
    /// Strict interior test; a point on the border is outside.
    pub fn contains(&self, p: Point) -> bool {
        self.x < p.x && p.x < self.x + self.width
            && self.y < p.y && p.y < self.y + self.height
    }
}

/// Pixel dimensions of the frame being played on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    pub width:  usize,
    pub height: usize,
}

impl FrameSize {
    pub fn new(width: usize, height: usize) -> Self { FrameSize { width, height } }
}

/// Reset button: fixed size, pinned to the top-right corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetButton {
    pub width:  f32,
    pub height: f32,
    /// Gap to the top and right frame edges.
    pub margin: f32,
}

impl Default for ResetButton {
    fn default() -> Self {
        ResetButton { width: 150.0, height: 50.0, margin: 10.0 }
    }
}

impl ResetButton {
    pub const LABEL: &'static str = "Reset";

    pub fn rect(&self, frame: FrameSize) -> Rect {
        Rect {
            x:      frame.width as f32 - self.width - self.margin,
            y:      self.margin,
            width:  self.width,
            height: self.height,
        }
    }
}
