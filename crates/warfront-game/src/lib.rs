//! Game state and command handlers for Warfront.
//!
//! Everything here is a pure translation of inbound typed events into
//! state mutations plus an acknowledgment decision — no broker types,
//! no I/O except through two narrow seams:
//!
//! - [`GamePublisher`] — the confirmed-publish path handlers use to
//!   cascade war recognitions and game logs.
//! - [`GameLogWriter`] — the moderator's append-only audit sink.
//!
//! The orchestrating binary owns a [`GameState`] behind a mutex and
//! passes it by reference into each handler call; there is no
//! process-wide singleton, which keeps every handler independently
//! testable.

#![allow(async_fn_in_trait)]

mod commands;
mod error;
mod log;
mod moves;
mod pause;
mod publisher;
mod state;
mod war;

pub use commands::{command_move, command_spawn, command_status};
pub use error::GameError;
pub use log::{GameLogWriter, handle_game_log};
pub use moves::{MoveOutcome, evaluate_move, handle_move};
pub use pause::handle_pause;
pub use publisher::GamePublisher;
pub use state::{ArmyUnit, GameState};
pub use war::{WarOutcome, handle_war, resolve_war};
