//! Roll-again-or-bank decisions for automated players.
//!
//! [`BalancedPolicy`] applies four rules in order, the first match wins:
//!
//! 1. Six dice in hand and nothing accumulated: always take the opening roll.
//! 2. Fewer than [`PUSH_BELOW_POINTS`] accumulated: continue.
//! 3. At least [`BANK_AT_POINTS`] accumulated: bank.
//! 4. Otherwise look up the odds of the remaining dice and compare the
//!    expected gain `(1 - bust) * expected_value` against a threshold.
//!
//! The numbers live in [`PolicyThresholds`] so a different set can be loaded
//! from a JSON file without touching the turn engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::outcome_oracle::{OutcomeOracle, OutcomeStats};

pub const PUSH_BELOW_POINTS: u32 = 300;
pub const BANK_AT_POINTS: u32 = 1000;
pub const HIGH_STAKES_FROM_POINTS: u32 = 600;
pub const LOW_STAKES_MIN_GAIN: f64 = 150.0;
pub const HIGH_STAKES_MIN_GAIN: f64 = 100.0;
pub const RELATIVE_MIN_GAIN: f64 = 100.0;
pub const KEPT_POINTS_WEIGHT: f64 = 0.25;

const OPENING_DICE: usize = 6;

/// Decides whether an automated player rolls the remaining dice again.
pub trait DecisionPolicy {
    /// `dice_remaining` is the number of dice the next roll would use,
    /// `turn_points` the points accumulated this turn (including the keep that
    /// was just made) and `points_just_kept` the score of that keep.
    fn should_continue(
        &self,
        dice_remaining: usize,
        turn_points: u32,
        points_just_kept: u32,
    ) -> bool;
}

impl<P> DecisionPolicy for &P
where
    P: DecisionPolicy + ?Sized,
{
    fn should_continue(
        &self,
        dice_remaining: usize,
        turn_points: u32,
        points_just_kept: u32,
    ) -> bool {
        (**self).should_continue(dice_remaining, turn_points, points_just_kept)
    }
}

/// Tunable numbers of [`BalancedPolicy`].
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyThresholds {
    /// Keep rolling while the turn holds fewer points than this.
    pub push_below_points: u32,
    /// Bank once the turn holds at least this many points.
    pub bank_at_points: u32,
    /// From this many points on, `high_stakes_min_gain` replaces `low_stakes_min_gain`.
    pub high_stakes_from_points: u32,
    pub low_stakes_min_gain: f64,
    pub high_stakes_min_gain: f64,
    /// Minimum expected gain for the relative-gain escape hatch.
    pub relative_min_gain: f64,
    /// Share of the points just kept that the expected gain has to beat.
    pub kept_points_weight: f64,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            push_below_points: PUSH_BELOW_POINTS,
            bank_at_points: BANK_AT_POINTS,
            high_stakes_from_points: HIGH_STAKES_FROM_POINTS,
            low_stakes_min_gain: LOW_STAKES_MIN_GAIN,
            high_stakes_min_gain: HIGH_STAKES_MIN_GAIN,
            relative_min_gain: RELATIVE_MIN_GAIN,
            kept_points_weight: KEPT_POINTS_WEIGHT,
        }
    }
}

/// Rule of [`BalancedPolicy`] that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum DecisionRule {
    #[display("opening roll")]
    OpeningRoll,
    #[display("below push threshold")]
    BelowPushThreshold,
    #[display("at bank threshold")]
    AtBankThreshold,
    #[display("expected gain")]
    ExpectedGain,
}

/// Threshold comparison, only present when the expected gain rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainComparison {
    pub threshold: f64,
    /// Expected gain minus the weighted points just kept.
    pub relative_gain: f64,
}

/// Why [`BalancedPolicy`] continued or banked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionAnalysis {
    pub rule: DecisionRule,
    pub dice_remaining: usize,
    /// Odds of rolling the remaining dice, looked up whichever rule fired.
    pub stats: OutcomeStats,
    pub expected_gain: f64,
    pub comparison: Option<GainComparison>,
    pub should_continue: bool,
}

impl fmt::Display for DecisionAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.should_continue { "roll again" } else { "bank" };
        write!(
            f,
            "{verdict} ({}): {} dice bust {:.1}%, expected {:.1}, gain {:.1}",
            self.rule,
            self.dice_remaining,
            self.stats.bust_probability * 100.0,
            self.stats.expected_value,
            self.expected_gain,
        )?;
        if let Some(comparison) = &self.comparison {
            write!(
                f,
                " vs {:.0}, relative {:.1}",
                comparison.threshold, comparison.relative_gain,
            )?;
        }
        Ok(())
    }
}

/// The standard heuristic: push early, bank big, weigh the odds in between.
///
/// Owns the [`OutcomeOracle`] it consults, so the odds of each dice count are
/// enumerated at most once per policy.
///
/// # Example
///
/// ```
/// use farkle_evaluator::decision_policy::{BalancedPolicy, DecisionPolicy};
///
/// let policy = BalancedPolicy::new();
/// assert!(policy.should_continue(3, 250, 50));
/// assert!(!policy.should_continue(5, 1200, 100));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BalancedPolicy {
    thresholds: PolicyThresholds,
    oracle: OutcomeOracle,
}

impl BalancedPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_thresholds(thresholds: PolicyThresholds) -> Self {
        Self {
            thresholds,
            oracle: OutcomeOracle::new(),
        }
    }

    #[must_use]
    pub fn thresholds(&self) -> &PolicyThresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn oracle(&self) -> &OutcomeOracle {
        &self.oracle
    }

    /// Evaluates the rules and reports which one decided, together with the
    /// odds of the remaining dice.
    ///
    /// # Panics
    ///
    /// Panics if `dice_remaining` is not in `1..=6`.
    #[must_use]
    pub fn analyze(
        &self,
        dice_remaining: usize,
        turn_points: u32,
        points_just_kept: u32,
    ) -> DecisionAnalysis {
        let th = &self.thresholds;
        let stats = self.oracle.stats(dice_remaining);
        let expected_gain = stats.expected_gain();
        let decided = |rule, comparison, should_continue| DecisionAnalysis {
            rule,
            dice_remaining,
            stats,
            expected_gain,
            comparison,
            should_continue,
        };

        if dice_remaining == OPENING_DICE && turn_points == 0 {
            return decided(DecisionRule::OpeningRoll, None, true);
        }
        if turn_points < th.push_below_points {
            return decided(DecisionRule::BelowPushThreshold, None, true);
        }
        if turn_points >= th.bank_at_points {
            return decided(DecisionRule::AtBankThreshold, None, false);
        }

        let threshold = if turn_points < th.high_stakes_from_points {
            th.low_stakes_min_gain
        } else {
            th.high_stakes_min_gain
        };
        let relative_gain = expected_gain - th.kept_points_weight * f64::from(points_just_kept);
        let should_continue = expected_gain > threshold
            || (relative_gain > 0.0 && expected_gain > th.relative_min_gain);

        decided(
            DecisionRule::ExpectedGain,
            Some(GainComparison {
                threshold,
                relative_gain,
            }),
            should_continue,
        )
    }
}

impl DecisionPolicy for BalancedPolicy {
    fn should_continue(
        &self,
        dice_remaining: usize,
        turn_points: u32,
        points_just_kept: u32,
    ) -> bool {
        self.analyze(dice_remaining, turn_points, points_just_kept)
            .should_continue
    }
}
