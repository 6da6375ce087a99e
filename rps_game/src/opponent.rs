//! The computer's side of the round.

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use rps_gesture::Gesture;

/// Something that picks the computer's throw when a countdown starts.
///
/// Implementations must only return one of [`Gesture::STANDARD`].
pub trait Opponent {
    fn throw(&mut self) -> Gesture;
}

/// Any `FnMut() -> Gesture` is an opponent, handy for scripted rounds.
impl<F: FnMut() -> Gesture> Opponent for F {
    fn throw(&mut self) -> Gesture { self() }
}

/// Uniform pick from Rock, Paper, Scissors.
#[derive(Clone, Debug)]
pub struct RandomOpponent<R = SmallRng> {
    rng: R,
}

impl RandomOpponent<SmallRng> {
    pub fn from_os_rng() -> Self {
        RandomOpponent { rng: SmallRng::from_os_rng() }
    }

    /// Reproducible sequence of throws.
    pub fn seeded(seed: u64) -> Self {
        RandomOpponent { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> Opponent for RandomOpponent<R> {
    fn throw(&mut self) -> Gesture {
        Gesture::STANDARD
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Gesture::Rock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_throws_are_standard() {
        let mut opp = RandomOpponent::seeded(7);
        for _ in 0..200 {
            assert!(opp.throw().is_standard());
        }
    }

    #[test]
    fn random_covers_all_three() {
        let mut opp = RandomOpponent::seeded(42);
        let seen: HashSet<Gesture> = (0..300).map(|_| opp.throw()).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn same_seed_same_throws() {
        let mut a = RandomOpponent::seeded(99);
        let mut b = RandomOpponent::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.throw(), b.throw());
        }
    }

    #[test]
    fn closure_opponent() {
        let mut n = 0;
        let mut opp = move || {
            n += 1;
            Gesture::STANDARD[n % 3]
        };
        assert_eq!(opp.throw(), Gesture::Paper);
        assert_eq!(opp.throw(), Gesture::Scissors);
    }
}
