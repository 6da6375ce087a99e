//! Landmark sources — an external hand detector, or keyboard/mouse simulation.
//!
//! Whatever the source, the app receives [`HandFrame`]s over an `mpsc`
//! channel and doesn't need to know whether they came from a camera model or
//! from the simulator.

use std::io::{self, BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use rps_gesture::{Gesture, HandPose, Landmark, PoseBuilder};

use crate::config::DetectorConfig;

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// Every hand detected in one camera frame, in detection order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<HandPose>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no detector command configured")]
    NoCommand,
    #[error("cannot start detector `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source:  io::Error,
    },
    #[error("detector stdout unavailable")]
    NoStdout,
    #[error("malformed detector frame: {0}")]
    Parse(#[from] serde_json::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for detector and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandFrame`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandFrame>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<HandFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorSource — JSON lines from a detector process or stdin
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    #[serde(default = "full_confidence")]
    score:      f32,
    landmarks:  Vec<Landmark>,
}

fn full_confidence() -> f32 { 1.0 }

#[derive(Deserialize, Debug)]
struct FrameJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// How far outside the unit square (normalized units) a detector landmark
/// may sit before its hand is discarded.
pub const OFF_FRAME_MARGIN: f32 = 0.5;

/// Decode one detector line into a frame.
///
/// Hands under `min_confidence`, without exactly 21 landmarks, or with a
/// landmark non-finite or beyond [`OFF_FRAME_MARGIN`] are dropped with a
/// warning; a frame carrying an `error` field yields no hands.
pub fn parse_frame(line: &str, opts: &DetectorConfig) -> Result<HandFrame, SourceError> {
    let frame: FrameJson = serde_json::from_str(line)?;

    if let Some(error) = frame.error {
        warn!("detector error: {}", error);
        return Ok(HandFrame::default());
    }

    let mut hands = Vec::with_capacity(frame.hands.len());
    for hand in frame.hands {
        if hand.score < opts.min_confidence {
            debug!("dropping {} hand at confidence {:.2}", hand.handedness, hand.score);
            continue;
        }
        match HandPose::from_landmarks(hand.landmarks) {
            Ok(pose) if !pose.within_frame(OFF_FRAME_MARGIN) => {
                warn!("dropping {} hand: landmarks outside the frame", hand.handedness);
            }
            Ok(pose) => hands.push(if opts.mirror { pose.mirrored() } else { pose }),
            Err(e)   => warn!("dropping {} hand: {}", hand.handedness, e),
        }
    }
    Ok(HandFrame { hands })
}

/// Landmark frames read line-by-line from an external detector.
///
/// Lines that don't start with `{` (start-up chatter such as `READY`) are
/// skipped; malformed JSON is logged and skipped.  End of input ends the
/// source, which the app treats as "quit".
pub struct DetectorSource<R> {
    reader: R,
    child:  Option<Child>,
    opts:   DetectorConfig,
}

impl DetectorSource<BufReader<ChildStdout>> {
    /// Start `opts.command` and read frames from its stdout.
    pub fn spawn(opts: DetectorConfig) -> Result<Self, SourceError> {
        let (program, args) = opts.command.split_first().ok_or(SourceError::NoCommand)?;
        let command = opts.command.join(" ");

        info!("starting hand detector: {}", command);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| SourceError::Spawn { command, source })?;

        let stdout = child.stdout.take().ok_or(SourceError::NoStdout)?;
        Ok(DetectorSource {
            reader: BufReader::new(stdout),
            child:  Some(child),
            opts,
        })
    }
}

impl DetectorSource<BufReader<io::Stdin>> {
    /// Read frames piped into this process.
    pub fn stdin(opts: DetectorConfig) -> Self {
        Self::from_reader(BufReader::new(io::stdin()), opts)
    }
}

impl<R: BufRead> DetectorSource<R> {
    pub fn from_reader(reader: R, opts: DetectorConfig) -> Self {
        DetectorSource { reader, child: None, opts }
    }

    /// Next frame, or `None` at end of input.
    pub fn next_frame(&mut self) -> Option<HandFrame> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    warn!("detector read failed: {}", e);
                    return None;
                }
            }
            let text = line.trim();
            if !text.starts_with('{') {
                if !text.is_empty() {
                    debug!("detector says: {}", text);
                }
                continue;
            }
            match parse_frame(text, &self.opts) {
                Ok(frame) => return Some(frame),
                Err(e)    => warn!("{}", e),
            }
        }
    }
}

impl<R: BufRead + Send + 'static> LandmarkSource for DetectorSource<R> {
    fn run(mut self: Box<Self>, tx: Sender<HandFrame>) {
        while let Some(frame) = self.next_frame() {
            if tx.send(frame).is_err() { return; }
        }
        info!("hand detector stream ended");
    }
}

impl<R> Drop for DetectorSource<R> {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    /// Hold up the given sign.
    Show(Gesture),
    /// Toggle whether the hand is in view at all.
    ToggleHand,
    /// Mouse moved; normalized frame coordinates.
    Pointer { x: f32, y: f32 },
}

/// Translates [`SimInput`] from the visualizer's window into synthetic hand
/// frames: one hand, showing the last chosen sign, its index fingertip on
/// the mouse.
pub struct SimLandmarkSource {
    rx:      Receiver<SimInput>,
    gesture: Gesture,
    visible: bool,
    pointer: (f32, f32),
}

impl SimLandmarkSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimLandmarkSource {
            rx,
            gesture: Gesture::None,
            visible: true,
            pointer: (0.5, 0.5),
        }
    }

    /// Apply one input and return the frame the camera would now see.
    pub fn apply(&mut self, input: SimInput) -> HandFrame {
        match input {
            SimInput::Show(g) => {
                self.gesture = g;
                self.visible = true;
            }
            SimInput::ToggleHand => self.visible = !self.visible,
            SimInput::Pointer { x, y } => self.pointer = (x, y),
        }
        self.frame()
    }

    fn frame(&self) -> HandFrame {
        if !self.visible {
            return HandFrame::default();
        }
        let (x, y) = self.pointer;
        HandFrame { hands: vec![PoseBuilder::new(self.gesture).anchored_at(x, y).build()] }
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn run(mut self: Box<Self>, tx: Sender<HandFrame>) {
        if tx.send(self.frame()).is_err() { return; }
        while let Ok(input) = self.rx.recv() {
            let frame = self.apply(input);
            if tx.send(frame).is_err() { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
