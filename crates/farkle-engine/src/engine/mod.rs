//! Turn and game orchestration.
//!
//! - [`DiceRoller`] - source of fresh dice ([`RandomRoller`], [`ScriptedRoller`])
//! - [`Turn`] - the per-turn state machine (roll, keep, hot dice, bank or bust)
//! - [`TurnPlayer`] / [`run_turn`] - drives a turn with a human or automated player
//! - [`GameSession`] - seats, running totals and winner detection
//!
//! # Turn Flow
//!
//! ```text
//!            +-----------+  score 0   +--------+
//!    +-----> |  Rolling  | ---------> | Busted |
//!    |       +-----------+            +--------+
//!    |             | score > 0
//!    |             v
//!    |       +-----------+  keep scores 0 (rejected, stay)
//!    |       | Selecting | <----+
//!    |       +-----------+ -----+
//!    |        |         |
//!    |  all   |         | some dice left
//!    |  dice  v         v
//!    |  +---------+  +----------+  bank   +--------+
//!    +--| HotDice |  | Deciding | ------> | Banked |
//!    |  +---------+  +----------+         +--------+
//!    |                    | continue
//!    +--------------------+
//! ```
//!
//! # Example
//!
//! ```
//! use farkle_engine::{Dice, ScriptedRoller, Turn, TurnOutcome};
//!
//! let mut roller = ScriptedRoller::new([Dice::from_faces([1, 5, 5, 2, 3, 4]).unwrap()]);
//! let mut turn = Turn::new();
//!
//! turn.roll(&mut roller).unwrap();
//! turn.keep(Dice::from_faces([1, 5, 5]).unwrap()).unwrap();
//! assert_eq!(turn.dice_in_play(), 3);
//!
//! turn.bank().unwrap();
//! assert_eq!(turn.outcome(), Some(TurnOutcome::Banked { points: 200 }));
//! ```

pub use self::{
    dice_roller::*, game_session::*, game_stats::*, scoreboard::*, turn::*, turn_player::*,
};

mod dice_roller;
mod game_session;
mod game_stats;
mod scoreboard;
mod turn;
mod turn_player;
