//! Farkle turn engine.
//!
//! - [`core`] - die faces, dice multisets and the scoring rule
//! - [`engine`] - die generators, the per-turn state machine, the turn driver
//!   and multi-player game sessions

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("die face must be between 1 and 6, got {value}")]
pub struct InvalidFaceError {
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DiceError {
    #[display("{_0}")]
    InvalidFace(InvalidFaceError),
    #[display("at most 6 dice can be in play, got {count}")]
    TooMany { count: usize },
}

impl From<InvalidFaceError> for DiceError {
    fn from(err: InvalidFaceError) -> Self {
        Self::InvalidFace(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TurnError {
    #[display("cannot {input} while the turn is {phase}")]
    UnexpectedInput {
        input: TurnInputKind,
        phase: TurnPhase,
    },
    #[display("expected {expected} dice to be rolled, got {actual}")]
    RollSizeMismatch { expected: usize, actual: usize },
    #[display("kept dice {kept} are not part of the roll {rolled}")]
    KeepNotInRoll { kept: Dice, rolled: Dice },
    #[display("kept dice {kept} score nothing, at least one scoring die must be kept")]
    NonScoringKeep { kept: Dice },
}

impl TurnError {
    /// Returns `true` if the error rejects a keep selection.
    ///
    /// The turn stays in [`TurnPhase::Selecting`] after these errors and
    /// accepts a corrected selection.
    #[must_use]
    pub fn is_keep_rejection(&self) -> bool {
        matches!(self, Self::KeepNotInRoll { .. } | Self::NonScoringKeep { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("a game needs at least one player")]
pub struct NoPlayersError;
