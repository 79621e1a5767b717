//! Exact odds of a single roll.
//!
//! For `n` dice every one of the `6^n` ordered outcomes is scored. The
//! fraction of zero-scoring outcomes is the bust probability and the mean
//! score is the expected value of the roll. Nothing is sampled, so the numbers
//! are identical on every run.
//!
//! | Dice | Bust probability | Expected points |
//! |------|------------------|-----------------|
//! | 1    | 0.667            | 25.0            |
//! | 2    | 0.444            | 50.0            |
//! | 3    | 0.278            | 86.8            |
//! | 4    | 0.157            | 141.3           |
//! | 5    | 0.077            | 215.5           |
//! | 6    | 0.031            | 308.8           |

use std::{cell::OnceCell, iter};

use farkle_engine::{DieFace, FACE_COUNT, FaceCounts, MAX_DICE, scoring};
use serde::Serialize;

/// Odds of rolling a given number of dice once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeStats {
    /// Probability that the roll scores nothing.
    pub bust_probability: f64,
    /// Mean score over all outcomes, busts counted as zero.
    pub expected_value: f64,
}

impl OutcomeStats {
    /// Enumerates all outcomes of `dice_count` dice.
    ///
    /// # Panics
    ///
    /// Panics if `dice_count` is not in `1..=6`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn compute(dice_count: usize) -> Self {
        assert!(
            (1..=MAX_DICE).contains(&dice_count),
            "dice count must be between 1 and {MAX_DICE}, got {dice_count}"
        );

        let total: usize = iter::repeat_n(FACE_COUNT, dice_count).product();
        let mut busts: u64 = 0;
        let mut points: u64 = 0;
        for outcome in 0..total {
            let score = scoring::score_counts(outcome_counts(outcome, dice_count));
            if score == 0 {
                busts += 1;
            }
            points += u64::from(score);
        }

        let total = total as f64;
        Self {
            bust_probability: busts as f64 / total,
            expected_value: points as f64 / total,
        }
    }

    /// Points a roll is expected to add once the bust chance is taken into account.
    #[must_use]
    pub fn expected_gain(&self) -> f64 {
        (1.0 - self.bust_probability) * self.expected_value
    }
}

/// Decodes the `index`-th ordered outcome of `dice_count` dice (base-6 digits) into a tally.
fn outcome_counts(mut index: usize, dice_count: usize) -> FaceCounts {
    let mut counts = FaceCounts::EMPTY;
    for _ in 0..dice_count {
        counts.add(DieFace::ALL[index % FACE_COUNT], 1);
        index /= FACE_COUNT;
    }
    counts
}

/// Lazily filled table of [`OutcomeStats`] for 1 to 6 dice.
///
/// Each entry is computed on first request and never changes afterwards, so
/// repeated lookups return the exact same values.
///
/// # Example
///
/// ```
/// use farkle_evaluator::outcome_oracle::OutcomeOracle;
///
/// let oracle = OutcomeOracle::new();
/// let one_die = oracle.stats(1);
/// assert_eq!(one_die.expected_value, 25.0);
/// assert!(oracle.is_cached(1));
/// assert!(!oracle.is_cached(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutcomeOracle {
    table: [OnceCell<OutcomeStats>; MAX_DICE],
}

impl OutcomeOracle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the odds of rolling `dice_count` dice.
    ///
    /// # Panics
    ///
    /// Panics if `dice_count` is not in `1..=6`.
    #[must_use]
    pub fn stats(&self, dice_count: usize) -> OutcomeStats {
        assert!(
            (1..=MAX_DICE).contains(&dice_count),
            "dice count must be between 1 and {MAX_DICE}, got {dice_count}"
        );
        *self.table[dice_count - 1].get_or_init(|| OutcomeStats::compute(dice_count))
    }

    #[must_use]
    pub fn is_cached(&self, dice_count: usize) -> bool {
        (1..=MAX_DICE).contains(&dice_count) && self.table[dice_count - 1].get().is_some()
    }

    /// Fills every entry up front.
    pub fn precompute(&self) {
        for dice_count in 1..=MAX_DICE {
            let _ = self.stats(dice_count);
        }
    }

    /// Odds for 1 to 6 dice, in order.
    pub fn all(&self) -> impl Iterator<Item = (usize, OutcomeStats)> + '_ {
        (1..=MAX_DICE).map(|dice_count| (dice_count, self.stats(dice_count)))
    }
}
