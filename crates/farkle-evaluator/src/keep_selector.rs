use farkle_engine::{Dice, DieFace, scoring};

/// Chooses which dice of a roll an automated player sets aside.
pub trait KeepSelector {
    /// Returns a subset of `rolled`.
    ///
    /// For a roll that scores, the subset must be non-empty and score more
    /// than zero.
    fn select_keep(&self, rolled: &Dice) -> Dice;
}

/// Keeps every scoring die.
///
/// One triple per face that shows three or more times, then every 1 and 5
/// that is left. The selection scores exactly as much as the whole roll.
///
/// # Example
///
/// ```
/// use farkle_engine::Dice;
/// use farkle_evaluator::keep_selector::{KeepSelector, ScoringDiceSelector};
///
/// let rolled = Dice::from_faces([2, 2, 2, 2, 5, 3]).unwrap();
/// let kept = ScoringDiceSelector.select_keep(&rolled);
/// assert_eq!(kept, Dice::from_faces([2, 2, 2, 5]).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringDiceSelector;

impl KeepSelector for ScoringDiceSelector {
    fn select_keep(&self, rolled: &Dice) -> Dice {
        let (mut kept, leftover) = scoring::split_triples(rolled.counts());
        for face in [DieFace::ONE, DieFace::FIVE] {
            kept.add(face, leftover.get(face));
        }
        kept.to_dice()
    }
}

impl<S> KeepSelector for &S
where
    S: KeepSelector + ?Sized,
{
    fn select_keep(&self, rolled: &Dice) -> Dice {
        (**self).select_keep(rolled)
    }
}
