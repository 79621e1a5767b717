use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Dice, DieFace, MAX_DICE};

/// Source of freshly rolled dice.
///
/// Every face returned must be independently uniform over `1..=6` for real
/// play. The turn engine calls this once per roll with the number of dice in
/// play.
pub trait DiceRoller {
    /// Rolls `count` dice.
    fn roll(&mut self, count: usize) -> Dice;
}

impl<R> DiceRoller for &mut R
where
    R: DiceRoller + ?Sized,
{
    fn roll(&mut self, count: usize) -> Dice {
        (**self).roll(count)
    }
}

/// 128-bit seed for reproducible dice.
///
/// Written as 32 hexadecimal digits, both on the command line and in JSON.
///
/// ```
/// use farkle_engine::DiceSeed;
///
/// let seed: DiceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// assert_eq!(seed.to_string(), "000102030405060708090a0b0c0d0e0f");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid dice seed {input:?}: expected 32 hexadecimal digits")]
pub struct ParseSeedError {
    input: String,
}

impl DiceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for DiceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for DiceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for DiceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DiceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<DiceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DiceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        DiceSeed(seed)
    }
}

/// Fair dice driven by a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct RandomRoller {
    seed: DiceSeed,
    rng: Pcg32,
}

impl Default for RandomRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomRoller {
    /// Creates a roller seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but the same seed always yields the same rolls.
    #[must_use]
    pub fn with_seed(seed: DiceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn seed(&self) -> DiceSeed {
        self.seed
    }
}

impl DiceRoller for RandomRoller {
    /// # Panics
    ///
    /// Panics if `count` exceeds [`MAX_DICE`].
    fn roll(&mut self, count: usize) -> Dice {
        assert!(count <= MAX_DICE, "cannot roll {count} dice");
        (0..count).map(|_| self.rng.random::<DieFace>()).collect()
    }
}

/// Replays a fixed sequence of rolls, ignoring the requested count.
///
/// Intended for tests and replays; the turn engine rejects a scripted roll of
/// the wrong size.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    rolls: VecDeque<Dice>,
}

impl ScriptedRoller {
    pub fn new<I>(rolls: I) -> Self
    where
        I: IntoIterator<Item = Dice>,
    {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DiceRoller for ScriptedRoller {
    /// # Panics
    ///
    /// Panics when the script has no rolls left.
    fn roll(&mut self, _count: usize) -> Dice {
        self.rolls
            .pop_front()
            .expect("scripted roller ran out of rolls")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_text_roundtrip() {
        let seed = DiceSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(
            "0123456789ABCDEFFEDCBA9876543210".parse::<DiceSeed>(),
            Ok(seed)
        );
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"0123456789abcdeffedcba9876543210\"");
        assert_eq!(serde_json::from_str::<DiceSeed>(&json).unwrap(), seed);
    }

    #[test]
    fn test_seed_rejects_malformed_text() {
        assert!("".parse::<DiceSeed>().is_err());
        assert!("0123".parse::<DiceSeed>().is_err());
        assert!("+123456789abcdeffedcba987654321".parse::<DiceSeed>().is_err());
        assert!("ghijklmnopqrstuvwxyzghijklmnopqr".parse::<DiceSeed>().is_err());
        assert!(serde_json::from_str::<DiceSeed>("\"abc\"").is_err());
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let seed: DiceSeed = rand::rng().random();
        let mut a = RandomRoller::with_seed(seed);
        let mut b = RandomRoller::with_seed(seed);
        for count in [6, 3, 1, 5, 6, 2] {
            let rolled = a.roll(count);
            assert_eq!(rolled.len(), count);
            assert_eq!(rolled, b.roll(count));
        }
        assert_eq!(a.seed(), seed);
    }

    #[test]
    fn test_scripted_roller_replays_in_order() {
        let first = Dice::from_faces([1, 2, 3]).unwrap();
        let second = Dice::from_faces([5]).unwrap();
        let mut roller = ScriptedRoller::new([first.clone(), second.clone()]);
        assert_eq!(roller.roll(3), first);
        assert_eq!(roller.remaining(), 1);
        assert_eq!(roller.roll(1), second);
        assert_eq!(roller.remaining(), 0);
    }
}
