use farkle_evaluator::outcome_oracle::OutcomeOracle;
use serde::{Deserialize, Serialize};

/// Odds of one roll of `dice` dice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsRow {
    pub dice: usize,
    pub bust_probability: f64,
    pub expected_value: f64,
    /// `(1 - bust_probability) * expected_value`
    pub expected_gain: f64,
}

impl OddsRow {
    pub fn table(oracle: &OutcomeOracle) -> Vec<Self> {
        oracle
            .all()
            .map(|(dice, stats)| Self {
                dice,
                bust_probability: stats.bust_probability,
                expected_value: stats.expected_value,
                expected_gain: stats.expected_gain(),
            })
            .collect()
    }
}
