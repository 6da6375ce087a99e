//! Software-rendered game window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┬──────────┐
//! │  Player: Rock                                    │  Reset   │
//! │  Computer: Paper                                 └──────────┘
//! │  Computer wins!                                             │
//! │                                                             │
//! │                 [hand skeletons]                            │
//! │                                                             │
//! │           Press Thumb-Up to Start  /  3...                  │
//! │                                                             │
//! │  status bar / key legend                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Drawing goes into a [`Canvas`], which has no window attached, so the
//! overlay logic can be tested headless.

use std::sync::mpsc::Sender;
use std::time::Duration;

use anyhow::anyhow;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use rps_game::{ResetButton, ViewModel};
use rps_gesture::{idx::INDEX_TIP, Gesture, HandPose, HAND_CONNECTIONS};

use crate::config::WindowConfig;
use crate::source::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR:     u32 = 0xFF1A1A2E;
const TEXT_BG:      u32 = 0xFF0F3460;
const GREEN:        u32 = 0xFF00FF00;
const RED:          u32 = 0xFFFF0000;
const BLUE:         u32 = 0xFF3050FF;
const WHITE:        u32 = 0xFFFFFFFF;
const LEGEND_COLOR: u32 = 0xFF888888;
const BONE_COLOR:   u32 = 0xFFDDDDDD;

const STATUS_H: usize = 36;

/// Distinct joint color for the `i`-th detected hand.
pub fn hand_color(i: usize) -> u32 {
    hsv_to_argb((i as f32 * 137.5) % 360.0, 0.82, 0.92)
}

/// Convert HSV → packed ARGB (0xAARRGGBB, A=0xFF).
fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h  = h % 360.0;
    let hi = (h / 60.0) as u32;
    let f  = h / 60.0 - hi as f32;
    let p  = v * (1.0 - s);
    let q  = v * (1.0 - s * f);
    let t  = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let ri = (r * 255.0) as u32;
    let gi = (g * 255.0) as u32;
    let bi = (b * 255.0) as u32;
    0xFF000000 | (ri << 16) | (gi << 8) | bi
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas — the framebuffer and its drawing primitives
// ════════════════════════════════════════════════════════════════════════════

pub struct Canvas {
    pub width:  usize,
    pub height: usize,
    pub buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![BG_COLOR; width * height] }
    }

    pub fn clear(&mut self) { self.buf.fill(BG_COLOR); }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.buf[y * self.width + x] = color;
        }
    }

    fn set_pixel_i(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    /// Within a few canvas sizes of the origin.  Farther points come from a
    /// broken detector and are not worth walking to.
    fn near(&self, x: isize, y: isize) -> bool {
        let limit = 4 * self.width.max(self.height);
        x.unsigned_abs() <= limit && y.unsigned_abs() <= limit
    }

    fn fill_disc(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        if !self.near(cx, cy) { return; }
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel_i(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham line, clipped to the canvas.  Segments reaching far past
    /// the canvas are skipped whole rather than walked pixel by pixel.
    fn draw_line(&mut self, (x0, y0): (isize, isize), (x1, y1): (isize, isize), color: u32) {
        if !self.near(x0, y0) || !self.near(x1, y1) { return; }
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.set_pixel_i(x, y, color);
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// 3×5 bitmap text, each font pixel drawn as a `scale`×`scale` block.
    pub fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx >= self.width { break; }
        }
    }

    fn draw_text_centred(&mut self, text: &str, cy: usize, scale: usize, color: u32) {
        let x = self.width.saturating_sub(text_width(text, scale)) / 2;
        self.draw_text(text, x, cy.saturating_sub(5 * scale / 2), scale, color);
    }

    // ── Hands ─────────────────────────────────────────────────────────────

    fn draw_hand(&mut self, pose: &HandPose, gesture: Option<Gesture>, color: u32) {
        let (w, h) = (self.width, self.height);
        let px = |i: usize| {
            let (x, y) = pose.to_pixels(i, w, h);
            (x.round() as isize, y.round() as isize)
        };
        for &(a, b) in HAND_CONNECTIONS.iter() {
            let (pa, pb) = (px(a), px(b));
            self.draw_line(pa, pb, BONE_COLOR);
        }
        for i in 0..pose.landmarks().len() {
            let (x, y) = px(i);
            self.fill_disc(x, y, 3, color);
        }
        if let Some(g) = gesture {
            let (wx, wy) = px(0);
            if (0..w as isize).contains(&wx) && (0..h as isize).contains(&wy) {
                self.draw_text(g.name(), wx as usize + 8, wy as usize + 8, 2, color);
            }
        }
    }

    // ── Phase overlays ────────────────────────────────────────────────────

    /// Draw one full frame: hands, the phase overlay, and the status bar.
    pub fn paint(&mut self, view: &ViewModel, hands: &[HandPose], gestures: &[Gesture], legend: &str) {
        self.clear();

        for (i, pose) in hands.iter().enumerate() {
            self.draw_hand(pose, gestures.get(i).copied(), hand_color(i));
        }

        // Pointer ring on the first hand's index fingertip.
        if let Some(pose) = hands.first() {
            let (x, y) = pose.to_pixels(INDEX_TIP, self.width, self.height);
            let (x, y) = (x.round() as isize, y.round() as isize);
            if self.near(x, y) {
                for deg in (0..360).step_by(10) {
                    let a = (deg as f32).to_radians();
                    let (dx, dy) = ((a.cos() * 8.0).round() as isize, (a.sin() * 8.0).round() as isize);
                    self.set_pixel_i(x + dx, y + dy, WHITE);
                }
            }
        }

        let mid_y = self.height / 2;
        match view {
            ViewModel::WaitingForStart { prompt } => {
                self.draw_text_centred(prompt, mid_y, 4, GREEN);
            }
            ViewModel::Countdown { seconds_left } => {
                self.draw_text_centred(&format!("{}...", seconds_left), mid_y, 16, RED);
            }
            ViewModel::GestureRecognition => {
                self.draw_text_centred("Show your hand!", mid_y, 4, GREEN);
            }
            ViewModel::ShowResult { player, computer, message, reset_button, .. } => {
                self.draw_text(&format!("Player: {}", player),     10, 70,  3, BLUE);
                self.draw_text(&format!("Computer: {}", computer), 10, 110, 3, GREEN);
                self.draw_text(message,                            10, 150, 3, GREEN);

                let r = reset_button;
                let (x, y) = (r.x.max(0.0) as usize, r.y.max(0.0) as usize);
                self.fill_rect(x, y, r.width as usize, r.height as usize, BLUE);
                let label_y = y + (r.height as usize).saturating_sub(15) / 2;
                self.draw_text(ResetButton::LABEL, x + 10, label_y, 3, WHITE);
            }
        }

        let status_y = self.height.saturating_sub(STATUS_H);
        self.fill_rect(0, status_y, self.width, STATUS_H, TEXT_BG);
        let status = match gestures {
            [] => "no hand in view".to_string(),
            gs => gs.iter().map(|g| g.name()).collect::<Vec<_>>().join(" / "),
        };
        self.draw_text(&status, 10, status_y + 6, 2, 0xFFEEEEEE);
        self.draw_text(legend, 10, status_y + 24, 1, LEGEND_COLOR);
    }
}

/// Pixel width of `text` at `scale`.
pub fn text_width(text: &str, scale: usize) -> usize {
    text.chars().count() * 4 * scale.max(1)
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer — the window around the canvas
// ════════════════════════════════════════════════════════════════════════════

pub const SIM_LEGEND: &str =
    "T=thumb-up  R=rock  P=paper  S=scissors  C=cowabunga  N=no sign  H=hide hand  Q=quit";
pub const DETECTOR_LEGEND: &str = "Q=quit";

pub struct Visualizer {
    window:     Window,
    canvas:     Canvas,
    /// Present only while a simulated hand is listening.
    sim_tx:     Option<Sender<SimInput>>,
    last_mouse: Option<(f32, f32)>,
}

impl Visualizer {
    pub fn new(cfg: &WindowConfig, sim_tx: Option<Sender<SimInput>>) -> anyhow::Result<Self> {
        let mut window = Window::new(
            &cfg.title,
            cfg.width, cfg.height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        ).map_err(|e| anyhow!("cannot open window: {}", e))?;

        let fps = cfg.fps.max(1) as u64;
        window.limit_update_rate(Some(Duration::from_micros(1_000_000 / fps)));

        Ok(Visualizer {
            window,
            canvas: Canvas::new(cfg.width, cfg.height),
            sim_tx,
            last_mouse: None,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Current window size in pixels.
    pub fn size(&self) -> (usize, usize) { self.window.get_size() }

    /// Poll keyboard and mouse.  Returns false on quit.  In simulation the
    /// sign keys and mouse are forwarded as [`SimInput`]; otherwise only
    /// quit is read.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if pressed(Key::Q) || pressed(Key::Escape) {
            return false;
        }
        let Some(tx) = self.sim_tx.as_ref() else { return true };

        let keys = [
            (Key::T, Gesture::ThumbUp),
            (Key::R, Gesture::Rock),
            (Key::P, Gesture::Paper),
            (Key::S, Gesture::Scissors),
            (Key::C, Gesture::Special),
            (Key::N, Gesture::None),
        ];
        for (key, gesture) in keys {
            if pressed(key) {
                let _ = tx.send(SimInput::Show(gesture));
            }
        }
        if pressed(Key::H) {
            let _ = tx.send(SimInput::ToggleHand);
        }

        let mouse = self.window.get_mouse_pos(MouseMode::Clamp);
        if let Some((mx, my)) = mouse.filter(|&m| self.last_mouse != Some(m)) {
            let (w, h) = self.window.get_size();
            let _ = tx.send(SimInput::Pointer {
                x: mx / w.max(1) as f32,
                y: my / h.max(1) as f32,
            });
            self.last_mouse = Some((mx, my));
        }

        true
    }

    /// Render one frame.
    pub fn render(&mut self, view: &ViewModel, hands: &[HandPose], gestures: &[Gesture], legend: &str) {
        let (w, h) = self.window.get_size();
        if w > 0 && h > 0 && (w, h) != (self.canvas.width, self.canvas.height) {
            self.canvas = Canvas::new(w, h);
        }
        self.canvas.paint(view, hands, gestures, legend);
        let (w, h) = (self.canvas.width, self.canvas.height);
        if let Err(e) = self.window.update_with_buffer(&self.canvas.buf, w, h) {
            log::warn!("window update failed: {}", e);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_game::{Outcome, Rect};
    use rps_gesture::PoseBuilder;

    fn count(canvas: &Canvas, color: u32) -> usize {
        canvas.buf.iter().filter(|&&c| c == color).count()
    }

    #[test]
    fn hand_colors_distinct_and_opaque() {
        let colors: Vec<u32> = (0..4).map(hand_color).collect();
        for (i, c) in colors.iter().enumerate() {
            assert_eq!(c >> 24, 0xFF);
            assert!(!colors[i + 1..].contains(c));
        }
    }

    #[test]
    fn fill_rect_clips_at_edges() {
        let mut c = Canvas::new(20, 10);
        c.fill_rect(15, 5, 50, 50, RED);
        assert_eq!(count(&c, RED), 5 * 5);
    }

    #[test]
    fn line_hits_both_ends() {
        let mut c = Canvas::new(50, 50);
        c.draw_line((2, 3), (40, 30), WHITE);
        assert_eq!(c.pixel(2, 3), Some(WHITE));
        assert_eq!(c.pixel(40, 30), Some(WHITE));
        // Off-canvas endpoints are clipped, not a panic.
        c.draw_line((-10, -10), (60, 60), WHITE);
    }

    #[test]
    fn text_scales() {
        let mut small = Canvas::new(100, 40);
        let mut big   = Canvas::new(100, 40);
        small.draw_text("1", 0, 0, 1, GREEN);
        big.draw_text("1", 0, 0, 2, GREEN);
        assert_eq!(count(&big, GREEN), 4 * count(&small, GREEN));
        assert_eq!(text_width("Reset", 3), 60);
    }

    #[test]
    fn waiting_prompt_is_drawn() {
        let mut c = Canvas::new(640, 480);
        c.paint(&ViewModel::WaitingForStart { prompt: "Press Thumb-Up to Start" }, &[], &[], SIM_LEGEND);
        assert!(count(&c, GREEN) > 0);
        assert_eq!(count(&c, RED), 0);
    }

    #[test]
    fn countdown_is_red() {
        let mut c = Canvas::new(640, 480);
        c.paint(&ViewModel::Countdown { seconds_left: 3 }, &[], &[], "");
        assert!(count(&c, RED) > 0);
    }

    #[test]
    fn result_draws_reset_button() {
        let mut c = Canvas::new(640, 480);
        let button = Rect { x: 480.0, y: 10.0, width: 150.0, height: 50.0 };
        let view = ViewModel::ShowResult {
            player:       Gesture::Rock,
            computer:     Gesture::Paper,
            outcome:      Outcome::ComputerWins,
            message:      Outcome::ComputerWins.message(),
            reset_button: button,
        };
        c.paint(&view, &[], &[], "");
        assert_eq!(c.pixel(485, 15), Some(BLUE));
        assert_eq!(c.pixel(625, 55), Some(BLUE));
        assert_ne!(c.pixel(475, 15), Some(BLUE));
    }

    #[test]
    fn far_off_landmark_does_not_stall_painting() {
        let mut c = Canvas::new(640, 480);
        let mut lm = *PoseBuilder::new(Gesture::Paper).build().landmarks();
        lm[INDEX_TIP].x = 1.0e7;
        lm[0].y = 1.0e30;
        let pose = HandPose::new(lm);
        c.paint(&ViewModel::GestureRecognition, &[pose], &[Gesture::Paper], "");
        // Bones between on-canvas joints are still drawn.
        assert!(count(&c, BONE_COLOR) > 0);
    }

    #[test]
    fn hands_are_drawn() {
        let mut c = Canvas::new(640, 480);
        let pose = PoseBuilder::new(Gesture::Paper).build();
        c.paint(&ViewModel::GestureRecognition, &[pose], &[Gesture::Paper], "");
        assert!(count(&c, hand_color(0)) > 0);
        assert!(count(&c, BONE_COLOR) > 0);
    }
}
