//! Error types for the game layer.
//!
//! These are domain validation failures: user-visible, reported to the
//! console, and never fatal. They have no network effect — a bad
//! command simply isn't published.

use warfront_protocol::UnitId;

/// Errors raised while parsing and validating interactive commands.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Wrong shape: missing arguments, unparseable tokens.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// The named place isn't on the map.
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// Not one of infantry/cavalry/artillery.
    #[error("unknown unit kind: {0}")]
    UnknownUnitKind(String),

    /// The unit id doesn't refer to a unit in the local roster.
    #[error("unit {0} is not in your army")]
    UnitNotOwned(UnitId),
}
