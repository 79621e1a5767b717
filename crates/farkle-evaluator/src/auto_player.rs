use farkle_engine::{Dice, Turn, TurnDecision, TurnError, TurnPlayer};

use crate::{
    decision_policy::{BalancedPolicy, DecisionPolicy, PolicyThresholds},
    keep_selector::{KeepSelector, ScoringDiceSelector},
};

/// Computer-controlled turn player.
///
/// Keeps the dice chosen by its [`KeepSelector`] and asks its
/// [`DecisionPolicy`] whether to roll again after every keep.
#[derive(Debug, Clone, Default)]
pub struct AutoPlayer<S = ScoringDiceSelector, P = BalancedPolicy> {
    selector: S,
    policy: P,
}

impl AutoPlayer {
    /// Scoring-dice selection with the default [`BalancedPolicy`].
    #[must_use]
    pub fn balanced() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_thresholds(thresholds: PolicyThresholds) -> Self {
        Self::new(
            ScoringDiceSelector,
            BalancedPolicy::with_thresholds(thresholds),
        )
    }
}

impl<S, P> AutoPlayer<S, P> {
    #[must_use]
    pub fn new(selector: S, policy: P) -> Self {
        Self { selector, policy }
    }

    #[must_use]
    pub fn selector(&self) -> &S {
        &self.selector
    }

    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<S, P> TurnPlayer for AutoPlayer<S, P>
where
    S: KeepSelector,
    P: DecisionPolicy,
{
    type Error = TurnError;

    fn select_keep(&mut self, _turn: &Turn, rolled: &Dice) -> Result<Dice, TurnError> {
        Ok(self.selector.select_keep(rolled))
    }

    fn decide(&mut self, turn: &Turn, kept_points: u32) -> Result<TurnDecision, TurnError> {
        let decision = if self.policy.should_continue(
            turn.dice_in_play(),
            turn.accumulated_points(),
            kept_points,
        ) {
            TurnDecision::Continue
        } else {
            TurnDecision::Bank
        };
        Ok(decision)
    }
}
