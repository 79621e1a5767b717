use crate::{Dice, DiceRoller, Turn, TurnError, TurnEvent, TurnOutcome, TurnState};

/// Whether to roll the remaining dice or end the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TurnDecision {
    Continue,
    Bank,
}

/// Makes the choices of a turn: which dice to keep and whether to roll again.
///
/// Implemented by human front-ends and by automated players.
pub trait TurnPlayer {
    type Error: From<TurnError>;

    /// Chooses which dice of a scoring roll to keep.
    fn select_keep(&mut self, turn: &Turn, rolled: &Dice) -> Result<Dice, Self::Error>;

    /// Chooses whether to continue after `kept_points` were just kept.
    ///
    /// `turn` already reflects the keep: its accumulated points include
    /// `kept_points` and its dice in play are the dice the next roll would use.
    fn decide(&mut self, turn: &Turn, kept_points: u32) -> Result<TurnDecision, Self::Error>;

    /// Called when a selection was rejected.
    ///
    /// Returning `Ok` asks for another selection from the same roll. The
    /// default gives up and returns the error.
    fn keep_rejected(&mut self, error: TurnError) -> Result<(), Self::Error> {
        Err(error.into())
    }

    /// Called after every accepted transition.
    fn observe(&mut self, _event: &TurnEvent) {}
}

impl<P> TurnPlayer for &mut P
where
    P: TurnPlayer + ?Sized,
{
    type Error = P::Error;

    fn select_keep(&mut self, turn: &Turn, rolled: &Dice) -> Result<Dice, Self::Error> {
        (**self).select_keep(turn, rolled)
    }

    fn decide(&mut self, turn: &Turn, kept_points: u32) -> Result<TurnDecision, Self::Error> {
        (**self).decide(turn, kept_points)
    }

    fn keep_rejected(&mut self, error: TurnError) -> Result<(), Self::Error> {
        (**self).keep_rejected(error)
    }

    fn observe(&mut self, event: &TurnEvent) {
        (**self).observe(event);
    }
}

/// Plays one full turn until it banks or busts.
///
/// Hot dice always continue with six fresh dice.
pub fn run_turn<R, P>(roller: &mut R, player: &mut P) -> Result<TurnOutcome, P::Error>
where
    R: DiceRoller + ?Sized,
    P: TurnPlayer + ?Sized,
{
    let mut turn = Turn::new();
    loop {
        let event = match turn.state().clone() {
            TurnState::Rolling => turn.roll(roller)?,
            TurnState::Selecting { rolled } => {
                let kept = player.select_keep(&turn, &rolled)?;
                match turn.keep(kept) {
                    Ok(event) => event,
                    Err(err) if err.is_keep_rejection() => {
                        player.keep_rejected(err)?;
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            TurnState::HotDice => turn.continue_rolling()?,
            TurnState::Deciding { kept_points } => match player.decide(&turn, kept_points)? {
                TurnDecision::Continue => turn.continue_rolling()?,
                TurnDecision::Bank => turn.bank()?,
            },
            TurnState::Banked { points } => return Ok(TurnOutcome::Banked { points }),
            TurnState::Busted { forfeited } => return Ok(TurnOutcome::Busted { forfeited }),
        };
        player.observe(&event);
    }
}
