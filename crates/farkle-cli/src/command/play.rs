use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use farkle_engine::{
    DEFAULT_TARGET_SCORE, Dice, DiceError, DiceRoller, DiceSeed, GameSession, Turn, TurnDecision,
    TurnError, TurnEvent, TurnOutcome, TurnPlayer,
};
use farkle_evaluator::auto_player::AutoPlayer;

use crate::util;

const MIN_SEATS: usize = 2;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of human players, seated first
    #[arg(long, default_value_t = 1)]
    humans: usize,
    /// Number of computer players
    #[arg(long, default_value_t = 1)]
    bots: usize,
    /// Points needed to win
    #[arg(
        long,
        default_value_t = DEFAULT_TARGET_SCORE,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    target_score: u32,
    /// Seed for the dice (32 hex digits); random when omitted
    #[arg(long)]
    seed: Option<DiceSeed>,
    /// Decision thresholds file for computer players (JSON)
    #[arg(long)]
    policy: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            humans: 1,
            bots: 1,
            target_score: DEFAULT_TARGET_SCORE,
            seed: None,
            policy: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        humans,
        bots,
        target_score,
        seed,
        policy,
    } = arg;

    let thresholds = util::load_thresholds(policy.as_deref())?;
    let mut seats = seat_lineup(*humans, *bots, || util::new_bot(thresholds));
    let mut session = GameSession::new(seats.len(), *target_score)?;
    let mut roller = util::dice_roller(*seed);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());

    play_game(&mut session, &mut seats, &mut roller, &mut console)?;
    Ok(())
}

#[derive(Debug)]
enum Seat {
    Human { name: String },
    Bot { name: String, player: AutoPlayer },
}

impl Seat {
    fn name(&self) -> &str {
        match self {
            Seat::Human { name } | Seat::Bot { name, .. } => name,
        }
    }
}

/// Humans first, then bots, with bots added until at least two seats are taken.
fn seat_lineup<F>(humans: usize, bots: usize, mut new_bot: F) -> Vec<Seat>
where
    F: FnMut() -> AutoPlayer,
{
    let bots = bots.max(MIN_SEATS.saturating_sub(humans));
    let humans = (0..humans).map(|i| Seat::Human {
        name: format!("Player {}", i + 1),
    });
    let bots = (0..bots).map(|i| Seat::Bot {
        name: format!("Bot {}", i + 1),
        player: new_bot(),
    });
    humans.chain(bots).collect()
}

/// Line-based terminal shared by every seat of a game.
#[derive(Debug)]
struct Console<I, W> {
    input: I,
    out: W,
}

impl<I, W> Console<I, W>
where
    I: BufRead,
    W: Write,
{
    fn new(input: I, out: W) -> Self {
        Self { input, out }
    }

    /// Prints `prompt` and reads one line without its line ending.
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from the console")?;
        anyhow::ensure!(read > 0, "console input ended");
        Ok(line.trim().to_owned())
    }
}

fn play_game<R, I, W>(
    session: &mut GameSession,
    seats: &mut [Seat],
    roller: &mut R,
    console: &mut Console<I, W>,
) -> anyhow::Result<usize>
where
    R: DiceRoller + ?Sized,
    I: BufRead,
    W: Write,
{
    writeln!(
        console.out,
        "First to {} points wins. Players: {}",
        session.target_score(),
        seats.iter().map(Seat::name).collect::<Vec<_>>().join(", ")
    )?;

    loop {
        if let Some(winner) = session.winner() {
            writeln!(
                console.out,
                "{} wins with {} points!",
                seats[winner].name(),
                session.scoreboard().total(winner)
            )?;
            return Ok(winner);
        }

        let seat = &mut seats[session.current_player()];
        writeln!(console.out)?;
        writeln!(
            console.out,
            "{}'s turn ({} points)",
            seat.name(),
            session.scoreboard().total(session.current_player())
        )?;
        let outcome = match seat {
            Seat::Human { .. } => {
                let mut human = HumanTurn {
                    console: &mut *console,
                };
                session.play_turn(roller, &mut human)?
            }
            Seat::Bot { player, .. } => {
                let mut bot = BotTurn {
                    player,
                    console: &mut *console,
                };
                session.play_turn(roller, &mut bot)?
            }
        };
        if let TurnOutcome::Busted { .. } = outcome {
            writeln!(console.out, "No points this turn.")?;
        }
        print_standings(session, seats, console)?;
    }
}

fn print_standings<I, W>(
    session: &GameSession,
    seats: &[Seat],
    console: &mut Console<I, W>,
) -> io::Result<()>
where
    W: Write,
{
    let standings = seats
        .iter()
        .zip(session.scoreboard().totals())
        .map(|(seat, total)| format!("{}: {total}", seat.name()))
        .collect::<Vec<_>>();
    writeln!(console.out, "Standings: {}", standings.join(", "))
}

fn print_event<I, W>(console: &mut Console<I, W>, event: &TurnEvent)
where
    W: Write,
{
    // narration is best effort, a broken stdout surfaces on the next prompt
    let _ = writeln!(console.out, "  {event}");
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
enum KeepInputError {
    #[display("{token:?} is not a die face")]
    NotAFace { token: String },
    #[display("{_0}")]
    Dice(DiceError),
}

/// Parses die faces separated by spaces or commas, e.g. `1 5 5` or `1,5,5`.
fn parse_keep(line: &str) -> Result<Dice, KeepInputError> {
    let faces = line
        .split([' ', ',', '\t'])
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u8>().map_err(|_| KeepInputError::NotAFace {
                token: token.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Dice::from_faces(faces).map_err(KeepInputError::Dice)
}

/// A human's turn, answered through the console.
struct HumanTurn<'a, I, W> {
    console: &'a mut Console<I, W>,
}

impl<I, W> TurnPlayer for HumanTurn<'_, I, W>
where
    I: BufRead,
    W: Write,
{
    type Error = anyhow::Error;

    fn select_keep(&mut self, _turn: &Turn, rolled: &Dice) -> anyhow::Result<Dice> {
        loop {
            let line = self
                .console
                .ask(&format!("Keep which dice of {rolled}? "))?;
            match parse_keep(&line) {
                Ok(kept) => return Ok(kept),
                Err(err) => writeln!(self.console.out, "  {err}")?,
            }
        }
    }

    fn decide(&mut self, turn: &Turn, _kept_points: u32) -> anyhow::Result<TurnDecision> {
        let answer = self.console.ask(&format!(
            "{} points this turn, {} dice left. Roll again? [y/N] ",
            turn.accumulated_points(),
            turn.dice_in_play()
        ))?;
        let decision = if matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") {
            TurnDecision::Continue
        } else {
            TurnDecision::Bank
        };
        Ok(decision)
    }

    fn keep_rejected(&mut self, error: TurnError) -> anyhow::Result<()> {
        writeln!(self.console.out, "  {error}")?;
        Ok(())
    }

    fn observe(&mut self, event: &TurnEvent) {
        print_event(self.console, event);
    }
}

/// A computer player's turn, narrated with its reasoning.
struct BotTurn<'a, I, W> {
    player: &'a mut AutoPlayer,
    console: &'a mut Console<I, W>,
}

impl<I, W> TurnPlayer for BotTurn<'_, I, W>
where
    W: Write,
{
    type Error = anyhow::Error;

    fn select_keep(&mut self, turn: &Turn, rolled: &Dice) -> anyhow::Result<Dice> {
        Ok(self.player.select_keep(turn, rolled)?)
    }

    fn decide(&mut self, turn: &Turn, kept_points: u32) -> anyhow::Result<TurnDecision> {
        let analysis = self.player.policy().analyze(
            turn.dice_in_play(),
            turn.accumulated_points(),
            kept_points,
        );
        writeln!(self.console.out, "  thinks: {analysis}")?;
        let decision = if analysis.should_continue {
            TurnDecision::Continue
        } else {
            TurnDecision::Bank
        };
        Ok(decision)
    }

    fn observe(&mut self, event: &TurnEvent) {
        print_event(self.console, event);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use farkle_engine::ScriptedRoller;

    use super::*;

    fn dice<const N: usize>(faces: [u8; N]) -> Dice {
        Dice::from_faces(faces).unwrap()
    }

    #[test]
    fn test_parse_keep() {
        assert_eq!(parse_keep("1 5 5").unwrap(), dice([1, 5, 5]));
        assert_eq!(parse_keep(" 1,5 , 5 ").unwrap(), dice([1, 5, 5]));
        assert!(parse_keep("").unwrap().is_empty());
        assert!(matches!(
            parse_keep("1 x"),
            Err(KeepInputError::NotAFace { .. })
        ));
        assert!(matches!(parse_keep("7"), Err(KeepInputError::Dice(_))));
        assert!(matches!(
            parse_keep("1 1 1 1 1 1 1"),
            Err(KeepInputError::Dice(DiceError::TooMany { .. }))
        ));
    }

    #[test]
    fn test_seat_lineup() {
        let seats = seat_lineup(2, 1, AutoPlayer::balanced);
        let names: Vec<_> = seats.iter().map(Seat::name).collect();
        assert_eq!(names, ["Player 1", "Player 2", "Bot 1"]);

        let seats = seat_lineup(0, 0, AutoPlayer::balanced);
        assert_eq!(seats.len(), 2);
        assert!(seats.iter().all(|seat| matches!(seat, Seat::Bot { .. })));

        let seats = seat_lineup(1, 0, AutoPlayer::balanced);
        assert!(matches!(seats[1], Seat::Bot { .. }));
    }

    #[test]
    fn test_human_against_bot() {
        let mut seats = seat_lineup(1, 1, AutoPlayer::balanced);
        let mut session = GameSession::new(seats.len(), 1000).unwrap();
        let mut roller = ScriptedRoller::new([
            // Player 1
            dice([1, 5, 5, 2, 3, 4]),
            // Bot 1
            dice([5, 2, 3, 4, 6, 6]),
            dice([1, 1, 1, 2, 3]),
        ]);
        let input = "2 3\nx\n1 5 5\nn\n";
        let mut console = Console::new(Cursor::new(input), Vec::new());

        let winner = play_game(&mut session, &mut seats, &mut roller, &mut console).unwrap();
        assert_eq!(winner, 1);
        assert_eq!(session.scoreboard().totals(), &[200, 1050]);

        let output = String::from_utf8(console.out).unwrap();
        assert!(output.contains("score nothing"));
        assert!(output.contains("\"x\" is not a die face"));
        assert!(output.contains("Roll again? [y/N]"));
        assert!(output.contains(
            "thinks: roll again (below push threshold): 5 dice bust 7.7%, expected 215.5"
        ));
        assert!(output.contains("thinks: bank (at bank threshold): 3 dice bust 27.8%"));
        assert!(output.contains("Standings: Player 1: 200, Bot 1: 0"));
        assert!(output.ends_with("Bot 1 wins with 1050 points!\n"));
    }

    #[test]
    fn test_closed_input_ends_the_game() {
        let mut seats = seat_lineup(1, 1, AutoPlayer::balanced);
        let mut session = GameSession::new(seats.len(), 1000).unwrap();
        let mut roller = ScriptedRoller::new([dice([1, 2, 3, 4, 6, 6])]);
        let mut console = Console::new(Cursor::new(""), Vec::new());

        let err = play_game(&mut session, &mut seats, &mut roller, &mut console).unwrap_err();
        assert!(err.to_string().contains("console input ended"));
    }
}
