//! Automated Farkle play built on exact dice odds.
//!
//! ```text
//! AutoPlayer (implements farkle_engine::TurnPlayer)
//!     ├─ KeepSelector     which dice to set aside
//!     └─ DecisionPolicy   roll again or bank
//!            ↓ uses
//!        OutcomeOracle    bust probability and expected points per dice count
//! ```
//!
//! - [`outcome_oracle`] - exhaustive enumeration of every outcome of 1-6 dice,
//!   computed once per dice count and cached in an explicit object
//! - [`decision_policy`] - the balanced roll-or-bank heuristic and its thresholds
//! - [`keep_selector`] - keeps triples, 1s and 5s
//! - [`auto_player`] - combines a selector and a policy into a turn player
//!
//! # Example
//!
//! ```
//! use farkle_engine::{RandomRoller, run_turn};
//! use farkle_evaluator::auto_player::AutoPlayer;
//!
//! let mut roller = RandomRoller::new();
//! let mut bot = AutoPlayer::balanced();
//! let outcome = run_turn(&mut roller, &mut bot).unwrap();
//! println!("{outcome:?}");
//! ```

pub mod auto_player;
pub mod decision_policy;
pub mod keep_selector;
pub mod outcome_oracle;
