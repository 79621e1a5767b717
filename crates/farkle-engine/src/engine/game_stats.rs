use serde::{Deserialize, Serialize};

use crate::TurnOutcome;

/// Turn statistics collected over one or more games.
///
/// # Example
///
/// ```
/// use farkle_engine::{GameStats, TurnOutcome};
///
/// let mut stats = GameStats::new();
/// stats.complete_turn(TurnOutcome::Banked { points: 350 });
/// stats.complete_turn(TurnOutcome::Busted { forfeited: 200 });
///
/// assert_eq!(stats.turns(), 2);
/// assert_eq!(stats.banked_points(), 350);
/// assert_eq!(stats.bust_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    turns: usize,
    busted_turns: usize,
    banked_points: u64,
    forfeited_points: u64,
    best_turn: u32,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            turns: 0,
            busted_turns: 0,
            banked_points: 0,
            forfeited_points: 0,
            best_turn: 0,
        }
    }

    #[must_use]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    #[must_use]
    pub const fn busted_turns(&self) -> usize {
        self.busted_turns
    }

    #[must_use]
    pub const fn banked_turns(&self) -> usize {
        self.turns - self.busted_turns
    }

    #[must_use]
    pub const fn banked_points(&self) -> u64 {
        self.banked_points
    }

    /// Points that were accumulated and then lost to a bust.
    #[must_use]
    pub const fn forfeited_points(&self) -> u64 {
        self.forfeited_points
    }

    /// Largest number of points banked in a single turn.
    #[must_use]
    pub const fn best_turn(&self) -> u32 {
        self.best_turn
    }

    /// Fraction of turns that ended in a bust, or `0.0` before any turn.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn bust_rate(&self) -> f64 {
        if self.turns == 0 {
            return 0.0;
        }
        self.busted_turns as f64 / self.turns as f64
    }

    /// Mean points banked per turn, busts included as zero.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn mean_points_per_turn(&self) -> f64 {
        if self.turns == 0 {
            return 0.0;
        }
        self.banked_points as f64 / self.turns as f64
    }

    pub fn complete_turn(&mut self, outcome: TurnOutcome) {
        self.turns += 1;
        match outcome {
            TurnOutcome::Banked { points } => {
                self.banked_points += u64::from(points);
                self.best_turn = self.best_turn.max(points);
            }
            TurnOutcome::Busted { forfeited } => {
                self.busted_turns += 1;
                self.forfeited_points += u64::from(forfeited);
            }
        }
    }

    /// Adds the counts of `other` to `self`.
    pub fn merge(&mut self, other: &Self) {
        self.turns += other.turns;
        self.busted_turns += other.busted_turns;
        self.banked_points += other.banked_points;
        self.forfeited_points += other.forfeited_points;
        self.best_turn = self.best_turn.max(other.best_turn);
    }
}
