use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{DiceError, DieFace, FaceCounts};

/// Number of dice a turn starts with, and the most that can ever be in play.
pub const MAX_DICE: usize = 6;

/// An unordered collection of up to six dice.
///
/// Used both for freshly rolled dice and for the subset a player keeps. The
/// order of faces is preserved for display but ignored by every comparison
/// that matters to the rules ([`Dice::counts`], [`Dice::is_subset_of`]).
///
/// # Example
///
/// ```
/// use farkle_engine::Dice;
///
/// let rolled = Dice::from_faces([1, 5, 5, 2, 3, 4]).unwrap();
/// let kept = Dice::from_faces([5, 1, 5]).unwrap();
///
/// assert!(kept.is_subset_of(&rolled));
/// assert_eq!(rolled.to_string(), "[1 5 5 2 3 4]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DieFace>", into = "Vec<DieFace>")]
pub struct Dice(ArrayVec<DieFace, MAX_DICE>);

impl Dice {
    #[must_use]
    pub const fn new() -> Self {
        Self(ArrayVec::new_const())
    }

    /// Builds dice from raw pip values.
    pub fn from_faces<I>(values: I) -> Result<Self, DiceError>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut dice = Self::new();
        for value in values {
            dice.try_push(DieFace::try_from(value)?)?;
        }
        Ok(dice)
    }

    pub fn try_push(&mut self, face: DieFace) -> Result<(), DiceError> {
        self.0.try_push(face).map_err(|_| DiceError::TooMany {
            count: MAX_DICE + 1,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DieFace> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[DieFace] {
        &self.0
    }

    #[must_use]
    pub fn counts(&self) -> FaceCounts {
        self.0.iter().collect()
    }

    /// Returns `true` if every die of `self` can be matched to a distinct die of `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.counts().is_subset_of(&other.counts())
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{face}")?;
        }
        write!(f, "]")
    }
}

/// Collects faces into dice.
///
/// # Panics
///
/// Panics if the iterator yields more than [`MAX_DICE`] faces.
impl FromIterator<DieFace> for Dice {
    fn from_iter<T: IntoIterator<Item = DieFace>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<Vec<DieFace>> for Dice {
    type Error = DiceError;

    fn try_from(faces: Vec<DieFace>) -> Result<Self, Self::Error> {
        let count = faces.len();
        ArrayVec::try_from(faces.as_slice())
            .map(Self)
            .map_err(|_| DiceError::TooMany { count })
    }
}

impl From<Dice> for Vec<DieFace> {
    fn from(dice: Dice) -> Self {
        dice.0.to_vec()
    }
}
