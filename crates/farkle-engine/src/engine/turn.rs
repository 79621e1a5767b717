use serde::Serialize;

use crate::{Dice, DiceRoller, MAX_DICE, TurnError, scoring};

/// Where a turn currently stands, with the data the next transition needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum TurnState {
    /// Waiting for `dice_in_play` fresh dice.
    Rolling,
    /// A scoring roll is waiting for the player to keep some of it.
    Selecting { rolled: Dice },
    /// Every die in play scored; the next roll uses all six dice again.
    HotDice,
    /// Dice are left over; the player either continues or banks.
    Deciding { kept_points: u32 },
    /// Terminal: the accumulated points are added to the player's total.
    Banked { points: u32 },
    /// Terminal: the roll scored nothing and the accumulated points are lost.
    Busted { forfeited: u32 },
}

/// [`TurnState`] without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum TurnPhase {
    #[display("rolling")]
    Rolling,
    #[display("selecting dice to keep")]
    Selecting,
    #[display("on hot dice")]
    HotDice,
    #[display("deciding whether to roll again")]
    Deciding,
    #[display("banked")]
    Banked,
    #[display("busted")]
    Busted,
}

impl TurnState {
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        match self {
            Self::Rolling => TurnPhase::Rolling,
            Self::Selecting { .. } => TurnPhase::Selecting,
            Self::HotDice => TurnPhase::HotDice,
            Self::Deciding { .. } => TurnPhase::Deciding,
            Self::Banked { .. } => TurnPhase::Banked,
            Self::Busted { .. } => TurnPhase::Busted,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Banked { .. } | Self::Busted { .. })
    }
}

/// Input that drives a [`Turn`] from one state to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInput {
    /// Freshly rolled dice; accepted while rolling.
    Roll(Dice),
    /// The subset of the last roll to set aside; accepted while selecting.
    Keep(Dice),
    /// Roll again; accepted while deciding and on hot dice.
    Continue,
    /// End the turn and keep the points; accepted while deciding.
    Bank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TurnInputKind {
    #[display("roll dice")]
    Roll,
    #[display("keep dice")]
    Keep,
    #[display("roll again")]
    Continue,
    #[display("bank points")]
    Bank,
}

impl TurnInput {
    #[must_use]
    pub fn kind(&self) -> TurnInputKind {
        match self {
            Self::Roll(_) => TurnInputKind::Roll,
            Self::Keep(_) => TurnInputKind::Keep,
            Self::Continue => TurnInputKind::Continue,
            Self::Bank => TurnInputKind::Bank,
        }
    }
}

/// What happened on an accepted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TurnEvent {
    #[display("rolled {dice} showing {points} points")]
    Rolled { dice: Dice, points: u32 },
    #[display("rolled {dice}: Farkle! {forfeited} turn points lost")]
    Busted { dice: Dice, forfeited: u32 },
    #[display("kept {dice} for {points} points ({turn_points} this turn, {dice_left} dice left)")]
    Kept {
        dice: Dice,
        points: u32,
        turn_points: u32,
        dice_left: usize,
    },
    #[display("kept {dice} for {points} points ({turn_points} this turn): hot dice!")]
    HotDice {
        dice: Dice,
        points: u32,
        turn_points: u32,
    },
    #[display("rolling {dice_in_play} dice again")]
    Continued { dice_in_play: usize },
    #[display("banked {points} points")]
    Banked { points: u32 },
}

/// How a finished turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum TurnOutcome {
    Banked { points: u32 },
    Busted { forfeited: u32 },
}

impl TurnOutcome {
    /// Points to add to the player's running total.
    #[must_use]
    pub const fn banked_points(&self) -> u32 {
        match self {
            Self::Banked { points } => *points,
            Self::Busted { .. } => 0,
        }
    }
}

/// State machine for a single player's turn.
///
/// A turn starts [`TurnState::Rolling`] six dice with no points and ends
/// either [`TurnState::Banked`] or [`TurnState::Busted`]. All transitions go
/// through [`Turn::advance`]; an input that is not accepted leaves the turn
/// untouched and returns a [`TurnError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    state: TurnState,
    accumulated_points: u32,
    dice_in_play: usize,
}

impl Default for Turn {
    fn default() -> Self {
        Self::new()
    }
}

impl Turn {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TurnState::Rolling,
            accumulated_points: 0,
            dice_in_play: MAX_DICE,
        }
    }

    #[must_use]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    /// Points kept so far this turn.
    ///
    /// Drops to zero when the turn busts.
    #[must_use]
    pub const fn accumulated_points(&self) -> u32 {
        self.accumulated_points
    }

    /// Number of dice the next roll uses.
    #[must_use]
    pub const fn dice_in_play(&self) -> usize {
        self.dice_in_play
    }

    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.state.is_busted()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the outcome once the turn reached a terminal state.
    #[must_use]
    pub fn outcome(&self) -> Option<TurnOutcome> {
        match self.state {
            TurnState::Banked { points } => Some(TurnOutcome::Banked { points }),
            TurnState::Busted { forfeited } => Some(TurnOutcome::Busted { forfeited }),
            _ => None,
        }
    }

    /// Applies one input.
    pub fn advance(&mut self, input: TurnInput) -> Result<TurnEvent, TurnError> {
        match (self.state.clone(), input) {
            (TurnState::Rolling, TurnInput::Roll(rolled)) => self.apply_roll(rolled),
            (TurnState::Selecting { rolled }, TurnInput::Keep(kept)) => {
                self.apply_keep(&rolled, kept)
            }
            (TurnState::HotDice, TurnInput::Continue) => {
                self.dice_in_play = MAX_DICE;
                self.state = TurnState::Rolling;
                Ok(TurnEvent::Continued {
                    dice_in_play: self.dice_in_play,
                })
            }
            (TurnState::Deciding { .. }, TurnInput::Continue) => {
                self.state = TurnState::Rolling;
                Ok(TurnEvent::Continued {
                    dice_in_play: self.dice_in_play,
                })
            }
            (TurnState::Deciding { .. }, TurnInput::Bank) => {
                let points = self.accumulated_points;
                self.state = TurnState::Banked { points };
                Ok(TurnEvent::Banked { points })
            }
            (state, input) => Err(TurnError::UnexpectedInput {
                input: input.kind(),
                phase: state.phase(),
            }),
        }
    }

    /// Rolls the dice in play with `roller`.
    ///
    /// The roller is only consulted when the turn is waiting for a roll.
    pub fn roll<R>(&mut self, roller: &mut R) -> Result<TurnEvent, TurnError>
    where
        R: DiceRoller + ?Sized,
    {
        if !self.state.is_rolling() {
            return Err(TurnError::UnexpectedInput {
                input: TurnInputKind::Roll,
                phase: self.phase(),
            });
        }
        let rolled = roller.roll(self.dice_in_play);
        self.advance(TurnInput::Roll(rolled))
    }

    pub fn keep(&mut self, kept: Dice) -> Result<TurnEvent, TurnError> {
        self.advance(TurnInput::Keep(kept))
    }

    pub fn continue_rolling(&mut self) -> Result<TurnEvent, TurnError> {
        self.advance(TurnInput::Continue)
    }

    pub fn bank(&mut self) -> Result<TurnEvent, TurnError> {
        self.advance(TurnInput::Bank)
    }

    fn apply_roll(&mut self, rolled: Dice) -> Result<TurnEvent, TurnError> {
        if rolled.len() != self.dice_in_play {
            return Err(TurnError::RollSizeMismatch {
                expected: self.dice_in_play,
                actual: rolled.len(),
            });
        }
        let points = scoring::score(&rolled);
        if points == 0 {
            let forfeited = self.accumulated_points;
            self.accumulated_points = 0;
            self.state = TurnState::Busted { forfeited };
            return Ok(TurnEvent::Busted {
                dice: rolled,
                forfeited,
            });
        }
        self.state = TurnState::Selecting { rolled: rolled.clone() };
        Ok(TurnEvent::Rolled {
            dice: rolled,
            points,
        })
    }

    fn apply_keep(&mut self, rolled: &Dice, kept: Dice) -> Result<TurnEvent, TurnError> {
        if !kept.is_subset_of(rolled) {
            return Err(TurnError::KeepNotInRoll {
                kept,
                rolled: rolled.clone(),
            });
        }
        let points = scoring::score(&kept);
        if points == 0 {
            return Err(TurnError::NonScoringKeep { kept });
        }
        self.accumulated_points += points;

        if kept.len() == self.dice_in_play {
            self.state = TurnState::HotDice;
            return Ok(TurnEvent::HotDice {
                dice: kept,
                points,
                turn_points: self.accumulated_points,
            });
        }

        self.dice_in_play = dice_left_after_keeping(kept.len());
        self.state = TurnState::Deciding {
            kept_points: points,
        };
        Ok(TurnEvent::Kept {
            dice: kept,
            points,
            turn_points: self.accumulated_points,
            dice_left: self.dice_in_play,
        })
    }
}

/// Dice for the next roll after keeping `kept` dice from a non-hot-dice roll.
///
/// A full set is rolled again if nothing would be left.
fn dice_left_after_keeping(kept: usize) -> usize {
    match MAX_DICE.saturating_sub(kept) {
        0 => MAX_DICE,
        left => left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedRoller;

    fn dice<const N: usize>(faces: [u8; N]) -> Dice {
        Dice::from_faces(faces).unwrap()
    }

    #[test]
    fn test_new_turn_rolls_six_dice() {
        let turn = Turn::new();
        assert_eq!(turn.state(), &TurnState::Rolling);
        assert_eq!(turn.accumulated_points(), 0);
        assert_eq!(turn.dice_in_play(), 6);
        assert_eq!(turn.outcome(), None);
    }

    #[test]
    fn test_keep_then_bank() {
        let mut turn = Turn::new();
        let event = turn.advance(TurnInput::Roll(dice([1, 5, 5, 2, 3, 4]))).unwrap();
        assert_eq!(
            event,
            TurnEvent::Rolled {
                dice: dice([1, 5, 5, 2, 3, 4]),
                points: 200
            }
        );
        assert_eq!(turn.phase(), TurnPhase::Selecting);

        turn.keep(dice([1, 5, 5])).unwrap();
        assert_eq!(turn.state(), &TurnState::Deciding { kept_points: 200 });
        assert_eq!(turn.dice_in_play(), 3);
        assert_eq!(turn.accumulated_points(), 200);

        assert_eq!(turn.bank().unwrap(), TurnEvent::Banked { points: 200 });
        assert!(turn.is_finished());
        assert_eq!(turn.outcome(), Some(TurnOutcome::Banked { points: 200 }));
    }

    #[test]
    fn test_continue_rolls_remaining_dice() {
        let mut roller = ScriptedRoller::new([dice([1, 5, 5, 2, 3, 4]), dice([5, 6, 6])]);
        let mut turn = Turn::new();
        turn.roll(&mut roller).unwrap();
        turn.keep(dice([1, 5, 5])).unwrap();
        assert_eq!(
            turn.continue_rolling().unwrap(),
            TurnEvent::Continued { dice_in_play: 3 }
        );
        let event = turn.roll(&mut roller).unwrap();
        assert_eq!(
            event,
            TurnEvent::Rolled {
                dice: dice([5, 6, 6]),
                points: 50
            }
        );
    }

    #[test]
    fn test_bust_discards_accumulated_points() {
        let mut roller = ScriptedRoller::new([dice([1, 5, 5, 2, 3, 4]), dice([2, 3, 4])]);
        let mut turn = Turn::new();
        turn.roll(&mut roller).unwrap();
        turn.keep(dice([1, 5, 5])).unwrap();
        turn.continue_rolling().unwrap();
        let event = turn.roll(&mut roller).unwrap();
        assert_eq!(
            event,
            TurnEvent::Busted {
                dice: dice([2, 3, 4]),
                forfeited: 200
            }
        );
        assert!(turn.is_busted());
        assert_eq!(turn.accumulated_points(), 0);
        assert_eq!(turn.outcome(), Some(TurnOutcome::Busted { forfeited: 200 }));
    }

    #[test]
    fn test_opening_bust() {
        let mut turn = Turn::new();
        turn.advance(TurnInput::Roll(dice([2, 3, 4, 6, 2, 3]))).unwrap();
        assert_eq!(turn.state(), &TurnState::Busted { forfeited: 0 });
        assert_eq!(turn.outcome().unwrap().banked_points(), 0);
    }

    #[test]
    fn test_non_scoring_keep_is_rejected_without_side_effects() {
        let mut turn = Turn::new();
        turn.advance(TurnInput::Roll(dice([1, 5, 5, 2, 3, 4]))).unwrap();
        let before = turn.clone();

        let err = turn.keep(dice([2, 3])).unwrap_err();
        assert_eq!(err, TurnError::NonScoringKeep { kept: dice([2, 3]) });
        assert!(err.is_keep_rejection());
        assert_eq!(turn, before);

        let err = turn.keep(Dice::new()).unwrap_err();
        assert!(err.is_keep_rejection());
        assert_eq!(turn, before);

        turn.keep(dice([1])).unwrap();
        assert_eq!(turn.accumulated_points(), 100);
        assert_eq!(turn.dice_in_play(), 5);
    }

    #[test]
    fn test_keep_must_come_from_roll() {
        let mut turn = Turn::new();
        turn.advance(TurnInput::Roll(dice([1, 5, 5, 2, 3, 4]))).unwrap();
        let before = turn.clone();
        let err = turn.keep(dice([1, 1])).unwrap_err();
        assert!(matches!(err, TurnError::KeepNotInRoll { .. }));
        assert_eq!(turn, before);
    }

    #[test]
    fn test_hot_dice_rolls_six_again() {
        let mut roller = ScriptedRoller::new([dice([1, 1, 1, 5, 5, 2])]);
        let mut turn = Turn::new();
        turn.roll(&mut roller).unwrap();
        turn.keep(dice([1, 1, 1, 5, 5])).unwrap();
        assert_eq!(turn.dice_in_play(), 1);
        turn.continue_rolling().unwrap();

        // One die left: keeping it means every die in play scored.
        turn.advance(TurnInput::Roll(dice([5]))).unwrap();
        let event = turn.keep(dice([5])).unwrap();
        assert_eq!(
            event,
            TurnEvent::HotDice {
                dice: dice([5]),
                points: 50,
                turn_points: 1150
            }
        );
        assert_eq!(turn.state(), &TurnState::HotDice);

        let err = turn.bank().unwrap_err();
        assert_eq!(
            err,
            TurnError::UnexpectedInput {
                input: TurnInputKind::Bank,
                phase: TurnPhase::HotDice
            }
        );
        assert_eq!(
            turn.continue_rolling().unwrap(),
            TurnEvent::Continued { dice_in_play: 6 }
        );
        assert_eq!(turn.dice_in_play(), 6);
    }

    #[test]
    fn test_all_six_scoring_is_hot_dice() {
        let mut turn = Turn::new();
        turn.advance(TurnInput::Roll(dice([1, 1, 1, 5, 5, 5]))).unwrap();
        turn.keep(dice([1, 1, 1, 5, 5, 5])).unwrap();
        assert_eq!(turn.state(), &TurnState::HotDice);
        assert_eq!(turn.accumulated_points(), 1500);
    }

    #[test]
    fn test_dice_left_counts_from_a_full_set() {
        let mut turn = Turn::new();
        turn.advance(TurnInput::Roll(dice([1, 2, 3, 4, 6, 6]))).unwrap();
        turn.keep(dice([1])).unwrap();
        turn.continue_rolling().unwrap();
        turn.advance(TurnInput::Roll(dice([5, 5, 2, 3, 4]))).unwrap();
        turn.keep(dice([5, 5])).unwrap();
        assert_eq!(turn.dice_in_play(), 4);
        assert_eq!(dice_left_after_keeping(6), 6);
        assert_eq!(dice_left_after_keeping(0), 6);
    }

    #[test]
    fn test_wrong_size_roll_is_rejected() {
        let mut turn = Turn::new();
        let err = turn.advance(TurnInput::Roll(dice([1, 5]))).unwrap_err();
        assert_eq!(
            err,
            TurnError::RollSizeMismatch {
                expected: 6,
                actual: 2
            }
        );
        assert_eq!(turn.state(), &TurnState::Rolling);
    }

    #[test]
    fn test_inputs_out_of_order_are_rejected() {
        let mut turn = Turn::new();
        assert!(turn.bank().is_err());
        assert!(turn.continue_rolling().is_err());
        assert!(turn.keep(dice([1])).is_err());

        turn.advance(TurnInput::Roll(dice([1, 5, 5, 2, 3, 4]))).unwrap();
        let mut roller = ScriptedRoller::default();
        let err = turn.roll(&mut roller).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot roll dice while the turn is selecting dice to keep"
        );

        turn.keep(dice([1])).unwrap();
        turn.bank().unwrap();
        assert!(turn.continue_rolling().is_err());
        assert!(turn.bank().is_err());
    }
}
