use serde::Serialize;

use crate::{
    DiceRoller, GameStats, NoPlayersError, Scoreboard, TurnOutcome, TurnPlayer, run_turn,
};

/// Points needed to win a standard game.
pub const DEFAULT_TARGET_SCORE: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Finished { winner: usize },
}

/// A game between a fixed number of seats taking turns in order.
///
/// The game ends as soon as the player who just finished a turn reaches the
/// target score.
#[derive(Debug, Clone)]
pub struct GameSession {
    scoreboard: Scoreboard,
    stats: Vec<GameStats>,
    current_player: usize,
    target_score: u32,
    turns_played: usize,
    session_state: SessionState,
}

impl GameSession {
    pub fn new(players: usize, target_score: u32) -> Result<Self, NoPlayersError> {
        Ok(Self {
            scoreboard: Scoreboard::new(players)?,
            stats: vec![GameStats::new(); players],
            current_player: 0,
            target_score,
            turns_played: 0,
            session_state: SessionState::Playing,
        })
    }

    #[must_use]
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.scoreboard.player_count()
    }

    /// Seat whose turn is next.
    #[must_use]
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    #[must_use]
    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    #[must_use]
    pub fn winner(&self) -> Option<usize> {
        match self.session_state {
            SessionState::Finished { winner } => Some(winner),
            SessionState::Playing => None,
        }
    }

    /// Turn statistics of one seat.
    #[must_use]
    pub fn player_stats(&self, player: usize) -> &GameStats {
        &self.stats[player]
    }

    /// Plays the current seat's turn and moves on to the next seat.
    ///
    /// # Panics
    ///
    /// Panics if the game is already finished.
    pub fn play_turn<R, P>(
        &mut self,
        roller: &mut R,
        player: &mut P,
    ) -> Result<TurnOutcome, P::Error>
    where
        R: DiceRoller + ?Sized,
        P: TurnPlayer + ?Sized,
    {
        assert!(self.session_state.is_playing(), "game is already finished");
        let outcome = run_turn(roller, player)?;
        self.complete_turn(outcome);
        Ok(outcome)
    }

    /// Records the outcome of the current seat's turn.
    ///
    /// # Panics
    ///
    /// Panics if the game is already finished.
    pub fn complete_turn(&mut self, outcome: TurnOutcome) {
        assert!(self.session_state.is_playing(), "game is already finished");
        let seat = self.current_player;
        self.scoreboard.add_to_total(seat, outcome.banked_points());
        self.stats[seat].complete_turn(outcome);
        self.turns_played += 1;

        if self.scoreboard.total(seat) >= self.target_score {
            self.session_state = SessionState::Finished { winner: seat };
        } else {
            self.current_player = (seat + 1) % self.player_count();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dice, DieFace, ScriptedRoller, Turn, TurnDecision, TurnError};

    /// Keeps loose 1s and 5s and banks right away.
    struct BankFirstScore;

    impl TurnPlayer for BankFirstScore {
        type Error = TurnError;

        fn select_keep(&mut self, _turn: &Turn, rolled: &Dice) -> Result<Dice, TurnError> {
            Ok(rolled
                .iter()
                .filter(|face| matches!(*face, DieFace::ONE | DieFace::FIVE))
                .collect())
        }

        fn decide(&mut self, _turn: &Turn, _kept: u32) -> Result<TurnDecision, TurnError> {
            Ok(TurnDecision::Bank)
        }
    }

    fn dice<const N: usize>(faces: [u8; N]) -> Dice {
        Dice::from_faces(faces).unwrap()
    }

    #[test]
    fn test_turns_rotate_and_totals_update() {
        let mut session = GameSession::new(2, DEFAULT_TARGET_SCORE).unwrap();
        let mut roller = ScriptedRoller::new([
            dice([1, 5, 2, 3, 4, 6]),
            dice([2, 3, 4, 6, 2, 3]),
            dice([5, 2, 3, 4, 6, 6]),
        ]);
        let mut player = BankFirstScore;

        let outcome = session.play_turn(&mut roller, &mut player).unwrap();
        assert_eq!(outcome, TurnOutcome::Banked { points: 150 });
        assert_eq!(session.current_player(), 1);

        let outcome = session.play_turn(&mut roller, &mut player).unwrap();
        assert!(outcome.is_busted());
        assert_eq!(session.current_player(), 0);

        session.play_turn(&mut roller, &mut player).unwrap();
        assert_eq!(session.scoreboard().totals(), &[200, 0]);
        assert_eq!(session.turns_played(), 3);
        assert_eq!(session.player_stats(1).busted_turns(), 1);
        assert_eq!(session.winner(), None);
    }

    #[test]
    fn test_reaching_target_finishes_game() {
        let mut session = GameSession::new(3, 1000).unwrap();
        session.complete_turn(TurnOutcome::Banked { points: 600 });
        session.complete_turn(TurnOutcome::Banked { points: 1000 });
        assert_eq!(session.winner(), Some(1));
        assert_eq!(session.current_player(), 1);
        assert!(session.session_state().is_finished());
    }

    #[test]
    #[should_panic(expected = "game is already finished")]
    fn test_no_turns_after_finish() {
        let mut session = GameSession::new(1, 100).unwrap();
        session.complete_turn(TurnOutcome::Banked { points: 100 });
        session.complete_turn(TurnOutcome::Banked { points: 100 });
    }

    #[test]
    fn test_requires_a_player() {
        assert!(GameSession::new(0, DEFAULT_TARGET_SCORE).is_err());
    }
}
