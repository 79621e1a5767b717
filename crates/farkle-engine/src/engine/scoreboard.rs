use serde::Serialize;

use crate::NoPlayersError;

/// Running totals of every seat in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    totals: Vec<u32>,
}

impl Scoreboard {
    pub fn new(players: usize) -> Result<Self, NoPlayersError> {
        if players == 0 {
            return Err(NoPlayersError);
        }
        Ok(Self {
            totals: vec![0; players],
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.totals.len()
    }

    /// Adds banked points to a player's total.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not a seat of this scoreboard.
    pub fn add_to_total(&mut self, player: usize, points: u32) {
        self.totals[player] += points;
    }

    /// # Panics
    ///
    /// Panics if `player` is not a seat of this scoreboard.
    #[must_use]
    pub fn total(&self, player: usize) -> u32 {
        self.totals[player]
    }

    #[must_use]
    pub fn totals(&self) -> &[u32] {
        &self.totals
    }
}
