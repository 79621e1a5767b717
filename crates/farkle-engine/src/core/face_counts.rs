use crate::{Dice, DieFace, FACE_COUNT};

/// Occurrence count of every face within a set of dice.
///
/// This is the order-free view of a [`Dice`] multiset used by scoring,
/// outcome enumeration and keep selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceCounts([u8; FACE_COUNT]);

impl FaceCounts {
    pub const EMPTY: Self = Self([0; FACE_COUNT]);

    #[must_use]
    pub const fn get(&self, face: DieFace) -> u8 {
        self.0[face.index()]
    }

    pub const fn add(&mut self, face: DieFace, count: u8) {
        self.0[face.index()] += count;
    }

    /// Removes `count` instances of `face`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `count` instances are present.
    pub const fn remove(&mut self, face: DieFace, count: u8) {
        assert!(self.0[face.index()] >= count);
        self.0[face.index()] -= count;
    }

    /// Total number of dice.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| usize::from(c)).sum()
    }

    /// Returns `true` if every face occurs in `self` no more often than in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.0.iter().zip(&other.0).all(|(a, b)| a <= b)
    }

    /// Iterates over the faces present with their counts, in face order.
    pub fn iter(&self) -> impl Iterator<Item = (DieFace, u8)> + '_ {
        DieFace::ALL
            .into_iter()
            .map(|face| (face, self.get(face)))
            .filter(|(_, count)| *count > 0)
    }

    /// Expands the tally into dice sorted by face.
    #[must_use]
    pub fn to_dice(&self) -> Dice {
        self.iter()
            .flat_map(|(face, count)| (0..count).map(move |_| face))
            .collect()
    }
}

impl<'a> FromIterator<&'a DieFace> for FaceCounts {
    fn from_iter<T: IntoIterator<Item = &'a DieFace>>(iter: T) -> Self {
        let mut counts = Self::EMPTY;
        for face in iter {
            counts.add(*face, 1);
        }
        counts
    }
}

impl FromIterator<DieFace> for FaceCounts {
    fn from_iter<T: IntoIterator<Item = DieFace>>(iter: T) -> Self {
        let mut counts = Self::EMPTY;
        for face in iter {
            counts.add(face, 1);
        }
        counts
    }
}
