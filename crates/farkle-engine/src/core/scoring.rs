//! Point values of dice.
//!
//! | Combination            | Points       |
//! |------------------------|--------------|
//! | Three 1s               | 1000         |
//! | Three of face `f` (2-6)| `f * 100`    |
//! | Single 1               | 100          |
//! | Single 5               | 50           |
//!
//! Only one triple per face is counted in a single scoring call. Four or five
//! of a kind score the triple plus the leftover dice on their own, so leftover
//! 2s, 3s, 4s and 6s are worth nothing.

use crate::{Dice, DieFace, FaceCounts};

pub const TRIPLE_ONES_POINTS: u32 = 1000;
pub const TRIPLE_POINTS_PER_PIP: u32 = 100;
pub const SINGLE_ONE_POINTS: u32 = 100;
pub const SINGLE_FIVE_POINTS: u32 = 50;

const TRIPLE: u8 = 3;

/// Scores a set of dice.
///
/// # Example
///
/// ```
/// use farkle_engine::{Dice, scoring};
///
/// let dice = Dice::from_faces([1, 1, 1, 5, 5, 2]).unwrap();
/// assert_eq!(scoring::score(&dice), 1100);
/// ```
#[must_use]
pub fn score(dice: &Dice) -> u32 {
    score_counts(dice.counts())
}

/// Scores a face tally.
#[must_use]
pub fn score_counts(counts: FaceCounts) -> u32 {
    let (triples, leftover) = split_triples(counts);
    let triple_points: u32 = triples.iter().map(|(face, _)| triple_bonus(face)).sum();
    triple_points
        + u32::from(leftover.get(DieFace::ONE)) * SINGLE_ONE_POINTS
        + u32::from(leftover.get(DieFace::FIVE)) * SINGLE_FIVE_POINTS
}

/// Separates one triple of every face that has at least three dice.
///
/// Returns the extracted triples and the dice left over.
#[must_use]
pub fn split_triples(mut counts: FaceCounts) -> (FaceCounts, FaceCounts) {
    let mut triples = FaceCounts::EMPTY;
    for face in DieFace::ALL {
        if counts.get(face) >= TRIPLE {
            counts.remove(face, TRIPLE);
            triples.add(face, TRIPLE);
        }
    }
    (triples, counts)
}

#[must_use]
pub const fn triple_bonus(face: DieFace) -> u32 {
    match face.value() {
        1 => TRIPLE_ONES_POINTS,
        pips => pips as u32 * TRIPLE_POINTS_PER_PIP,
    }
}
