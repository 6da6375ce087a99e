//! Top-level application loop.
//!
//! `App` owns the round state machine and the latest classified hands.  It
//! takes [`HandFrame`]s from whichever landmark source is running and is
//! ticked once per rendered frame.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Instant;

use log::{debug, info, warn};

use rps_game::{FrameSize, GameStateMachine, Opponent, Point, RandomOpponent, ViewModel};
use rps_gesture::{classify_with, idx, Gesture, HandPose, Thresholds};

use crate::config::{AppConfig, DetectorConfig};
use crate::source::{
    spawn_landmark_source, DetectorSource, HandFrame, SimInput, SimLandmarkSource, SourceError,
};
use crate::visualizer::{Visualizer, DETECTOR_LEGEND, SIM_LEGEND};

// ════════════════════════════════════════════════════════════════════════════
// SourceKind
// ════════════════════════════════════════════════════════════════════════════

/// Where hand landmarks come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// Keyboard and mouse drive a synthetic hand.
    #[default]
    Sim,
    /// JSON-lines frames on stdin.
    Stdin,
    /// JSON-lines frames from the configured detector command.
    Detector,
}

/// A running landmark source.
pub struct Feed {
    pub frames: Receiver<HandFrame>,
    /// Keyboard/mouse input for the simulated hand; `None` for real sources.
    pub sim:    Option<Sender<SimInput>>,
    pub legend: &'static str,
}

/// Start the chosen source on its own thread.
pub fn open_source(source: SourceKind, detector: &DetectorConfig) -> Result<Feed, SourceError> {
    let feed = match source {
        SourceKind::Sim => {
            let (tx, rx) = mpsc::channel();
            Feed {
                frames: spawn_landmark_source(SimLandmarkSource::new(rx)),
                sim:    Some(tx),
                legend: SIM_LEGEND,
            }
        }
        SourceKind::Stdin => Feed {
            frames: spawn_landmark_source(DetectorSource::stdin(detector.clone())),
            sim:    None,
            legend: DETECTOR_LEGEND,
        },
        SourceKind::Detector => Feed {
            frames: spawn_landmark_source(DetectorSource::spawn(detector.clone())?),
            sim:    None,
            legend: DETECTOR_LEGEND,
        },
    };
    info!("landmark source: {:?}", source);
    Ok(feed)
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

pub struct App<O = RandomOpponent> {
    game:       GameStateMachine<O>,
    thresholds: Thresholds,
    hands:      Vec<HandPose>,
    gestures:   Vec<Gesture>,
}

impl App<RandomOpponent> {
    /// Computer throws from OS entropy, or reproducibly from `seed`.
    pub fn new(cfg: &AppConfig, seed: Option<u64>) -> Self {
        let opponent = match seed {
            Some(s) => RandomOpponent::seeded(s),
            None    => RandomOpponent::from_os_rng(),
        };
        Self::with_opponent(cfg, opponent)
    }
}

impl<O: Opponent> App<O> {
    pub fn with_opponent(cfg: &AppConfig, opponent: O) -> Self {
        App {
            game:       GameStateMachine::with_opponent(cfg.game.clone(), cfg.frame(), opponent),
            thresholds: cfg.thresholds,
            hands:      Vec::new(),
            gestures:   Vec::new(),
        }
    }

    pub fn game(&self)     -> &GameStateMachine<O> { &self.game }
    pub fn hands(&self)    -> &[HandPose]          { &self.hands }
    pub fn gestures(&self) -> &[Gesture]           { &self.gestures }

    // ── process one HandFrame ────────────────────────────────────────────

    /// Replace the visible hands with a new camera frame.
    pub fn on_frame(&mut self, frame: HandFrame) {
        let gestures: Vec<Gesture> = frame
            .hands
            .iter()
            .map(|pose| classify_with(pose, &self.thresholds))
            .collect();
        if gestures != self.gestures {
            debug!("hands: {:?}", gestures);
        }
        self.gestures = gestures;
        self.hands = frame.hands;
    }

    /// The window changed size.
    pub fn resize(&mut self, frame: FrameSize) {
        if frame != self.game.frame() {
            debug!("frame resized to {}x{}", frame.width, frame.height);
            self.game.resize(frame);
        }
    }

    /// Index fingertip in frame pixels: the first one on the Reset button,
    /// else the first hand's.
    pub fn pointer(&self) -> Option<Point> {
        let frame = self.game.frame();
        let button = self.game.reset_button();
        let tips: Vec<Point> = self.hands.iter().map(|pose| {
            let (x, y) = pose.to_pixels(idx::INDEX_TIP, frame.width, frame.height);
            Point::new(x, y)
        }).collect();
        tips.iter().copied().find(|&p| button.contains(p)).or(tips.first().copied())
    }

    // ── per-frame tick ───────────────────────────────────────────────────

    pub fn tick(&mut self, now: Instant) -> ViewModel {
        let pointer = self.pointer();
        self.game.tick(&self.gestures, pointer, now)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Entry point
// ════════════════════════════════════════════════════════════════════════════

pub fn run(cfg: AppConfig, source: SourceKind, seed: Option<u64>) -> anyhow::Result<()> {
    // ── Landmark source ───────────────────────────────────────────────────
    let Feed { frames, sim, legend } = open_source(source, &cfg.detector)?;

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(&cfg.window, sim)?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = App::new(&cfg, seed);

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Window input; in sim mode this feeds the synthetic hand.
        if !vis.poll_input() { break; }

        // 2. Drain landmark frames, keeping only the newest.
        loop {
            match frames.try_recv() {
                Ok(frame) => app.on_frame(frame),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("landmark source closed");
                    return Ok(());
                }
            }
        }

        // 3. Per-frame logic
        let (w, h) = vis.size();
        app.resize(FrameSize::new(w, h));
        let view = app.tick(Instant::now());

        // 4. Render
        vis.render(&view, app.hands(), app.gestures(), legend);
    }

    info!("window closed");
    Ok(())
}
