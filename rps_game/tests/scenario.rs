//! Whole rounds, start to reset, with a seeded computer.

use std::time::{Duration, Instant};

use rps_game::{
    FrameSize, GameConfig, GamePhase, GameStateMachine, Opponent, Point, RandomOpponent, ViewModel,
};
use rps_gesture::{classify, Gesture, PoseBuilder};

/// First seed whose opening throw is `want`.
fn seed_throwing(want: Gesture) -> u64 {
    (0..10_000u64)
        .find(|&s| RandomOpponent::seeded(s).throw() == want)
        .expect("some seed throws the wanted gesture")
}

fn play(player: Gesture) -> (GameStateMachine, Instant) {
    let seed = seed_throwing(Gesture::Rock);
    let mut game = GameStateMachine::with_opponent(
        GameConfig::default(),
        FrameSize::new(640, 480),
        RandomOpponent::seeded(seed),
    );
    let t0 = Instant::now();

    game.tick(&[Gesture::ThumbUp], None, t0);
    assert_eq!(game.session().computer_choice(), Some(Gesture::Rock));

    game.tick(&[], None, t0 + Duration::from_secs(4));
    assert_eq!(game.phase(), GamePhase::GestureRecognition);

    game.tick(&[player], None, t0 + Duration::from_secs(5));
    assert_eq!(game.phase(), GamePhase::ShowResult);
    (game, t0)
}

#[test]
fn scissors_against_rock_loses() {
    let (game, _) = play(Gesture::Scissors);
    assert_eq!(game.session().result_message(), Some("Computer wins!"));
}

#[test]
fn rock_against_rock_ties() {
    let (game, _) = play(Gesture::Rock);
    assert_eq!(game.session().result_message(), Some("It's a tie!"));
}

#[test]
fn cowabunga_against_rock_wins() {
    let (game, _) = play(Gesture::Special);
    assert_eq!(game.session().result_message(), Some("You Win!"));
}

#[test]
fn reset_then_play_again() {
    let (mut game, t0) = play(Gesture::Paper);
    assert_eq!(game.session().result_message(), Some("You win!"));

    let button = game.reset_button();
    let centre = Point::new(button.x + button.width / 2.0, button.y + button.height / 2.0);
    let view = game.tick(&[], Some(centre), t0 + Duration::from_secs(6));
    assert!(matches!(view, ViewModel::WaitingForStart { .. }));
    assert_eq!(game.session().computer_choice(), None);
    assert_eq!(game.session().player_choice(), None);
    assert_eq!(game.session().result_message(), None);

    game.tick(&[Gesture::ThumbUp], None, t0 + Duration::from_secs(7));
    assert_eq!(game.phase(), GamePhase::Countdown);
}

#[test]
fn round_driven_by_synthetic_hands() {
    // Frame → poses → classify → tick, as the presentation loop does it.
    let frame = FrameSize::new(800, 600);
    let mut game = GameStateMachine::with_opponent(GameConfig::default(), frame, || Gesture::Paper);
    let t0 = Instant::now();

    let hands = |g: Gesture, x: f32, y: f32| {
        let pose = PoseBuilder::new(g).anchored_at(x, y).build();
        let tip = pose.index_tip();
        (classify(&pose), Point::new(tip.x * frame.width as f32, tip.y * frame.height as f32))
    };

    let (g, p) = hands(Gesture::ThumbUp, 0.5, 0.5);
    game.tick(&[g], Some(p), t0);
    let (g, p) = hands(Gesture::None, 0.5, 0.5);
    game.tick(&[g], Some(p), t0 + Duration::from_secs(4));
    game.tick(&[g], Some(p), t0 + Duration::from_millis(4500));
    assert_eq!(game.phase(), GamePhase::GestureRecognition);

    let (g, p) = hands(Gesture::Scissors, 0.4, 0.4);
    game.tick(&[g], Some(p), t0 + Duration::from_secs(5));
    assert_eq!(game.session().result_message(), Some("You win!"));

    // Button spans x 640..790, y 10..60 on an 800-wide frame.
    let (g, p) = hands(Gesture::Paper, 715.0 / 800.0, 35.0 / 600.0);
    game.tick(&[g], Some(p), t0 + Duration::from_secs(6));
    assert_eq!(game.phase(), GamePhase::WaitingForStart);
}
