use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use farkle_engine::{DiceSeed, RandomRoller};
use farkle_evaluator::{auto_player::AutoPlayer, decision_policy::PolicyThresholds};

/// Writes `value` as pretty JSON to `path`, or to stdout when no path is given.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_pretty_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_pretty_json(io::stdout().lock(), value)
            .context("Failed to write JSON to stdout"),
    }
}

fn write_pretty_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads decision thresholds from `path`, or returns the defaults when no path is given.
pub fn load_thresholds(path: Option<&Path>) -> anyhow::Result<PolicyThresholds> {
    match path {
        Some(path) => read_json_file("policy", path),
        None => Ok(PolicyThresholds::default()),
    }
}

/// Computer player whose odds for every dice count are computed up front.
pub fn new_bot(thresholds: PolicyThresholds) -> AutoPlayer {
    let bot = AutoPlayer::with_thresholds(thresholds);
    bot.policy().oracle().precompute();
    bot
}

/// Creates the die generator for a run and reports its seed on stderr.
pub fn dice_roller(seed: Option<DiceSeed>) -> RandomRoller {
    let roller = seed.map_or_else(RandomRoller::new, RandomRoller::with_seed);
    eprintln!("Dice seed: {}", roller.seed());
    roller
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_without_file() {
        assert_eq!(load_thresholds(None).unwrap(), PolicyThresholds::default());
    }

    #[test]
    fn test_missing_policy_file_is_reported() {
        let err = load_thresholds(Some(Path::new("no/such/policy.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to open policy file"));
    }

    #[test]
    fn test_saved_json_reads_back() {
        let path = std::env::temp_dir()
            .join(format!("farkle-thresholds-{}.json", std::process::id()));
        let thresholds = PolicyThresholds {
            bank_at_points: 1500,
            ..PolicyThresholds::default()
        };
        save_json(&thresholds, Some(path.as_path())).unwrap();
        let loaded = load_thresholds(Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), thresholds);
    }

    #[test]
    fn test_unwritable_output_is_reported() {
        let err = save_json(&1, Some(Path::new("no/such/dir/out.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }

    #[test]
    fn test_new_bot_has_all_odds_cached() {
        let bot = new_bot(PolicyThresholds::default());
        let oracle = bot.policy().oracle();
        assert!((1..=6).all(|dice| oracle.is_cached(dice)));
        assert_eq!(bot.policy().thresholds(), &PolicyThresholds::default());
    }

    #[test]
    fn test_seeded_roller_keeps_seed() {
        let seed: DiceSeed = "00000000000000000000000000000001".parse().unwrap();
        assert_eq!(dice_roller(Some(seed)).seed(), seed);
    }
}
