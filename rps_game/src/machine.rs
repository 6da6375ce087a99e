//! The round state machine.
//!
//! `GameStateMachine` owns the one [`Session`] of a running game.  Nothing
//! else writes to it; the caller only sees it through read accessors and the
//! [`ViewModel`] returned from each [`GameStateMachine::tick`].

use std::time::Instant;

use log::{debug, info};
use rps_gesture::Gesture;

use crate::config::GameConfig;
use crate::layout::{FrameSize, Point, Rect};
use crate::opponent::{Opponent, RandomOpponent};
use crate::rules::{determine_winner, Outcome};

/// Text shown while waiting for a player.
pub const START_PROMPT: &str = "Press Thumb-Up to Start";

// ════════════════════════════════════════════════════════════════════════════
// Phase
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    WaitingForStart,
    Countdown,
    GestureRecognition,
    ShowResult,
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

/// Per-phase data.  Each variant carries exactly the fields that are set in
/// that phase, so the optional fields of [`Session`] can never disagree with
/// the phase.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Stage {
    WaitingForStart,
    Countdown          { deadline: Instant, computer: Gesture },
    GestureRecognition { computer: Gesture },
    ShowResult         { computer: Gesture, player: Gesture, outcome: Outcome },
}

/// Mutable state of the running game.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    stage: Stage,
}

impl Default for Session {
    fn default() -> Self {
        Session { stage: Stage::WaitingForStart }
    }
}

impl Session {
    pub fn phase(&self) -> GamePhase {
        match self.stage {
            Stage::WaitingForStart           => GamePhase::WaitingForStart,
            Stage::Countdown { .. }          => GamePhase::Countdown,
            Stage::GestureRecognition { .. } => GamePhase::GestureRecognition,
            Stage::ShowResult { .. }         => GamePhase::ShowResult,
        }
    }

    /// Set only during `Countdown`.
    pub fn countdown_deadline(&self) -> Option<Instant> {
        match self.stage {
            Stage::Countdown { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// Set from the start of `Countdown` until the game resets.
    pub fn computer_choice(&self) -> Option<Gesture> {
        match self.stage {
            Stage::WaitingForStart => None,
            Stage::Countdown { computer, .. }
            | Stage::GestureRecognition { computer }
            | Stage::ShowResult { computer, .. } => Some(computer),
        }
    }

    /// Set only during `ShowResult`.
    pub fn player_choice(&self) -> Option<Gesture> {
        match self.stage {
            Stage::ShowResult { player, .. } => Some(player),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.stage {
            Stage::ShowResult { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Set only during `ShowResult`.
    pub fn result_message(&self) -> Option<&'static str> {
        self.outcome().map(Outcome::message)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ViewModel
// ════════════════════════════════════════════════════════════════════════════

/// What the current phase wants drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewModel {
    WaitingForStart { prompt: &'static str },
    /// Whole seconds left, rounded up (never 0 while counting down).
    Countdown { seconds_left: u64 },
    GestureRecognition,
    ShowResult {
        player:       Gesture,
        computer:     Gesture,
        outcome:      Outcome,
        message:      &'static str,
        reset_button: Rect,
    },
}

impl ViewModel {
    pub fn phase(&self) -> GamePhase {
        match self {
            ViewModel::WaitingForStart { .. } => GamePhase::WaitingForStart,
            ViewModel::Countdown { .. }       => GamePhase::Countdown,
            ViewModel::GestureRecognition     => GamePhase::GestureRecognition,
            ViewModel::ShowResult { .. }      => GamePhase::ShowResult,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GameStateMachine
// ════════════════════════════════════════════════════════════════════════════

pub struct GameStateMachine<O = RandomOpponent> {
    session:  Session,
    config:   GameConfig,
    frame:    FrameSize,
    opponent: O,
}

impl GameStateMachine<RandomOpponent> {
    /// A machine whose computer throws from OS entropy.
    pub fn new(config: GameConfig, frame: FrameSize) -> Self {
        Self::with_opponent(config, frame, RandomOpponent::from_os_rng())
    }
}

impl<O: Opponent> GameStateMachine<O> {
    pub fn with_opponent(config: GameConfig, frame: FrameSize, opponent: O) -> Self {
        GameStateMachine {
            session: Session::default(),
            config,
            frame,
            opponent,
        }
    }

    pub fn session(&self) -> &Session   { &self.session }
    pub fn phase(&self)   -> GamePhase  { self.session.phase() }
    pub fn frame(&self)   -> FrameSize  { self.frame }

    /// The frame changed size; the Reset button moves with its right edge.
    pub fn resize(&mut self, frame: FrameSize) {
        self.frame = frame;
    }

    pub fn reset_button(&self) -> Rect {
        self.config.reset_button.rect(self.frame)
    }

    // ── per-frame tick ────────────────────────────────────────────────────

    /// Advance by one frame.
    ///
    /// `observed` holds the gesture of every visible hand, in detection
    /// order (may be empty).  `pointer` is the index fingertip in frame
    /// pixels, consulted only on the result screen.  At most one phase
    /// change happens per call.
    pub fn tick(&mut self, observed: &[Gesture], pointer: Option<Point>, now: Instant) -> ViewModel {
        match self.session.stage {
            Stage::WaitingForStart => {
                if observed.contains(&Gesture::ThumbUp) {
                    let computer = self.opponent.throw();
                    debug_assert!(computer.is_standard(), "opponent threw {}", computer);
                    let countdown = self.config.countdown();
                    let deadline = now.checked_add(countdown).unwrap_or(now);
                    self.session.stage = Stage::Countdown { deadline, computer };
                    info!("thumb-up seen, counting down {:?}", countdown);
                    debug!("computer throws {}", computer);
                }
            }

            Stage::Countdown { deadline, computer } => {
                if now >= deadline {
                    self.session.stage = Stage::GestureRecognition { computer };
                    info!("countdown over, reading the player's hand");
                }
            }

            Stage::GestureRecognition { computer } => {
                // First recognisable hand in detection order wins.
                if let Some(&player) = observed.iter().find(|g| **g != Gesture::None) {
                    if observed.len() > 1 {
                        debug!("{} hands visible, taking {}", observed.len(), player);
                    }
                    let outcome = determine_winner(player, computer);
                    self.session.stage = Stage::ShowResult { computer, player, outcome };
                    info!("player {} vs computer {}: {}", player, computer, outcome);
                }
            }

            Stage::ShowResult { .. } => {
                let button = self.reset_button();
                if pointer.is_some_and(|p| button.contains(p)) {
                    self.session = Session::default();
                    info!("reset pressed, waiting for a new player");
                }
            }
        }

        self.view(now)
    }

    /// The view for the current state without advancing it.
    pub fn view(&self, now: Instant) -> ViewModel {
        match self.session.stage {
            Stage::WaitingForStart => ViewModel::WaitingForStart { prompt: START_PROMPT },
            Stage::Countdown { deadline, .. } => {
                let left = deadline.saturating_duration_since(now);
                let seconds_left = left.as_secs_f64().ceil().max(1.0) as u64;
                ViewModel::Countdown { seconds_left }
            }
            Stage::GestureRecognition { .. } => ViewModel::GestureRecognition,
            Stage::ShowResult { computer, player, outcome } => ViewModel::ShowResult {
                player,
                computer,
                outcome,
                message: outcome.message(),
                reset_button: self.reset_button(),
            },
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
