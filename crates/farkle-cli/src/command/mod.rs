use clap::{Parser, Subcommand};

use self::{odds::OddsArg, play::PlayArg, simulate::SimulateArg};

mod odds;
mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game at the console against computer players
    Play(#[clap(flatten)] PlayArg),
    /// Run bot-only games and report win and bust statistics
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print the exact odds of rolling 1 to 6 dice
    Odds(#[clap(flatten)] OddsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Odds(arg) => odds::run(&arg)?,
    }
    Ok(())
}
