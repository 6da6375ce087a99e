//! Who wins a throw.

use std::fmt;

use rps_gesture::Gesture;

/// Result of one round, from the player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Tie,
    /// Standard precedence win.
    PlayerWins,
    /// Win by throwing the COWABUNGA wildcard.
    Wildcard,
    ComputerWins,
}

impl Outcome {
    pub fn is_player_win(self) -> bool {
        matches!(self, Outcome::PlayerWins | Outcome::Wildcard)
    }

    /// Banner text for the result screen.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Tie          => "It's a tie!",
            Outcome::PlayerWins   => "You win!",
            Outcome::Wildcard     => "You Win!",
            Outcome::ComputerWins => "Computer wins!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Standard precedence: Rock > Scissors > Paper > Rock.
pub fn beats(a: Gesture, b: Gesture) -> bool {
    matches!(
        (a, b),
        (Gesture::Rock, Gesture::Scissors)
            | (Gesture::Paper, Gesture::Rock)
            | (Gesture::Scissors, Gesture::Paper)
    )
}

/// Decide a round.  Equal throws tie; the wildcard beats every standard
/// sign; anything the player doesn't beat goes to the computer.
pub fn determine_winner(player: Gesture, computer: Gesture) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player == Gesture::Special && computer.is_standard() {
        Outcome::Wildcard
    } else if beats(player, computer) {
        Outcome::PlayerWins
    } else {
        Outcome::ComputerWins
    }
}
