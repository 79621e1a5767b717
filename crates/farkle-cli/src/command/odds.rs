use std::path::PathBuf;

use farkle_evaluator::outcome_oracle::OutcomeOracle;

use crate::{model::odds_table::OddsRow, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct OddsArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &OddsArg) -> anyhow::Result<()> {
    let OddsArg { output } = arg;

    eprintln!("Enumerating outcomes of 1 to 6 dice...");
    let oracle = OutcomeOracle::new();
    let rows = OddsRow::table(&oracle);
    util::save_json(&rows, output.as_deref())?;

    for row in &rows {
        eprintln!(
            "  {} dice: bust {:5.1}%, expected {:6.1}, gain {:6.1}",
            row.dice,
            row.bust_probability * 100.0,
            row.expected_value,
            row.expected_gain,
        );
    }
    Ok(())
}
