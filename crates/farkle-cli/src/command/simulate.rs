use std::path::PathBuf;

use farkle_engine::{DEFAULT_TARGET_SCORE, DiceRoller, DiceSeed, GameSession};
use farkle_evaluator::decision_policy::PolicyThresholds;

use crate::{
    model::simulation_report::SimulationTally,
    util,
};

/// Bot games that run this many turns are abandoned as stuck.
const MAX_TURNS_PER_GAME: usize = 10_000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: usize,
    /// Number of computer players per game
    #[arg(long, default_value_t = 2)]
    bots: usize,
    /// Points needed to win a game
    #[arg(
        long,
        default_value_t = DEFAULT_TARGET_SCORE,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    target_score: u32,
    /// Seed for the dice (32 hex digits); random when omitted
    #[arg(long)]
    seed: Option<DiceSeed>,
    /// Decision thresholds file (JSON)
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        bots,
        target_score,
        seed,
        policy,
        output,
    } = arg;

    anyhow::ensure!(*games > 0, "at least one game must be simulated");
    let thresholds = util::load_thresholds(policy.as_deref())?;
    let mut roller = util::dice_roller(*seed);

    let tally = simulate(&mut roller, *games, *bots, *target_score, thresholds)?;
    let report = tally.into_report(roller.seed(), *target_score, thresholds);
    util::save_json(&report, output.as_deref())?;

    eprintln!();
    eprintln!("Simulation completed");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Games: {}", report.games);
    for (seat, wins) in report.wins_by_seat.iter().enumerate() {
        eprintln!("  Seat {}: {wins} wins", seat + 1);
    }
    eprintln!("  Mean turns per game: {:.1}", report.mean_turns_per_game);
    eprintln!("  Mean points per turn: {:.1}", report.stats.mean_points_per_turn());
    eprintln!("  Bust rate: {:.1}%", report.bust_rate * 100.0);
    eprintln!("  Best turn: {}", report.stats.best_turn());

    Ok(())
}

fn simulate<R>(
    roller: &mut R,
    games: usize,
    bots: usize,
    target_score: u32,
    thresholds: PolicyThresholds,
) -> anyhow::Result<SimulationTally>
where
    R: DiceRoller + ?Sized,
{
    let mut bot = util::new_bot(thresholds);
    let mut tally = SimulationTally::new(bots);
    let progress_step = (games / 10).max(1);

    for game in 0..games {
        let mut session = GameSession::new(bots, target_score)?;
        while session.winner().is_none() {
            anyhow::ensure!(
                session.turns_played() < MAX_TURNS_PER_GAME,
                "game #{game} did not finish within {MAX_TURNS_PER_GAME} turns"
            );
            session.play_turn(roller, &mut bot)?;
        }
        tally.record(&session);

        if (game + 1) % progress_step == 0 {
            eprintln!("Played {}/{games} games", game + 1);
        }
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use farkle_engine::RandomRoller;

    use super::*;

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let seed = DiceSeed::from_bytes([42; 16]);
        let run = || {
            let mut roller = RandomRoller::with_seed(seed);
            simulate(&mut roller, 5, 2, 2000, PolicyThresholds::default())
                .unwrap()
                .into_report(seed, 2000, PolicyThresholds::default())
        };
        let first = run();
        let second = run();
        assert_eq!(first.games, 5);
        assert_eq!(first.wins_by_seat.iter().sum::<usize>(), 5);
        assert_eq!(first.wins_by_seat, second.wins_by_seat);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_requires_a_seat() {
        let mut roller = RandomRoller::new();
        assert!(simulate(&mut roller, 1, 0, 1000, PolicyThresholds::default()).is_err());
    }
}
