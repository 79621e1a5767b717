use chrono::{DateTime, Utc};
use farkle_engine::{DiceSeed, GameSession, GameStats};
use farkle_evaluator::decision_policy::PolicyThresholds;
use serde::{Deserialize, Serialize};

/// Results of a batch of bot-only games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Timestamp when the report was generated (ISO 8601 format)
    pub generated_at: DateTime<Utc>,
    /// Seed of the die generator shared by all games
    pub seed: DiceSeed,
    pub games: usize,
    /// Players per game
    pub seats: usize,
    pub target_score: u32,
    /// Decision thresholds used by every seat
    pub thresholds: PolicyThresholds,
    /// Games won by each seat, seat 0 always starts
    pub wins_by_seat: Vec<usize>,
    pub mean_turns_per_game: f64,
    /// Turn statistics of all seats over all games
    pub stats: GameStats,
    pub bust_rate: f64,
}

/// Accumulates finished games into a [`SimulationReport`].
#[derive(Debug, Clone)]
pub struct SimulationTally {
    wins_by_seat: Vec<usize>,
    games: usize,
    turns: usize,
    stats: GameStats,
}

impl SimulationTally {
    pub fn new(seats: usize) -> Self {
        Self {
            wins_by_seat: vec![0; seats],
            games: 0,
            turns: 0,
            stats: GameStats::new(),
        }
    }

    /// Adds a game that has a winner.
    pub fn record(&mut self, session: &GameSession) {
        if let Some(winner) = session.winner() {
            self.wins_by_seat[winner] += 1;
        }
        self.games += 1;
        self.turns += session.turns_played();
        for seat in 0..session.player_count() {
            self.stats.merge(session.player_stats(seat));
        }
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn into_report(
        self,
        seed: DiceSeed,
        target_score: u32,
        thresholds: PolicyThresholds,
    ) -> SimulationReport {
        let mean_turns_per_game = if self.games == 0 {
            0.0
        } else {
            self.turns as f64 / self.games as f64
        };
        SimulationReport {
            generated_at: Utc::now(),
            seed,
            games: self.games,
            seats: self.wins_by_seat.len(),
            target_score,
            thresholds,
            wins_by_seat: self.wins_by_seat,
            mean_turns_per_game,
            bust_rate: self.stats.bust_rate(),
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use farkle_engine::TurnOutcome;

    use super::*;

    #[test]
    fn test_tally_collects_wins_and_turns() {
        let mut tally = SimulationTally::new(2);

        let mut session = GameSession::new(2, 500).unwrap();
        session.complete_turn(TurnOutcome::Busted { forfeited: 300 });
        session.complete_turn(TurnOutcome::Banked { points: 600 });
        tally.record(&session);

        let mut session = GameSession::new(2, 500).unwrap();
        session.complete_turn(TurnOutcome::Banked { points: 500 });
        tally.record(&session);

        let seed = DiceSeed::from_bytes([7; 16]);
        let report = tally.into_report(seed, 500, PolicyThresholds::default());
        assert_eq!(report.games, 2);
        assert_eq!(report.seats, 2);
        assert_eq!(report.wins_by_seat, [1, 1]);
        assert_eq!(report.mean_turns_per_game, 1.5);
        assert_eq!(report.stats.turns(), 3);
        assert_eq!(report.stats.busted_turns(), 1);
        assert!((report.bust_rate - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_json_uses_hex_seed() {
        let seed = DiceSeed::from_bytes([0xab; 16]);
        let report = SimulationTally::new(3).into_report(seed, 10_000, PolicyThresholds::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], "abababababababababababababababab");
        assert_eq!(json["wins_by_seat"], serde_json::json!([0, 0, 0]));
        assert_eq!(json["thresholds"]["bank_at_points"], 1000);
        assert_eq!(json["mean_turns_per_game"], 0.0);
    }
}
