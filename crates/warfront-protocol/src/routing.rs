//! Exchange names and routing keys.
//!
//! Three exchanges carry all traffic:
//! - [`EXCHANGE_DIRECT`] — exact-match routing; pause broadcasts.
//! - [`EXCHANGE_TOPIC`] — wildcard routing; moves, wars, game logs.
//! - [`EXCHANGE_DLX`] — fanout dead-letter target; every queue routes
//!   discarded/expired messages here instead of destroying them.

pub const EXCHANGE_DIRECT: &str = "warfront_direct";
pub const EXCHANGE_TOPIC: &str = "warfront_topic";
pub const EXCHANGE_DLX: &str = "warfront_dlx";

/// The durable queue bound to [`EXCHANGE_DLX`] that collects
/// dead-lettered messages.
pub const DEAD_LETTER_QUEUE: &str = "warfront_dlq";

/// Pause messages: published and bound with the bare key so a single
/// publish reaches every client; each client's *queue* is suffixed with
/// its username (see [`pause_queue`]).
pub const PAUSE_KEY: &str = "pause";

pub const ARMY_MOVES_PREFIX: &str = "army_moves";
pub const WAR_RECOGNITIONS_PREFIX: &str = "war_recognitions";
pub const GAME_LOGS_PREFIX: &str = "game_logs";

/// Shared durable queue names for the topic consumers.
pub const WAR_RECOGNITIONS_QUEUE: &str = "war_recognitions";
pub const GAME_LOGS_QUEUE: &str = "game_logs";

/// Per-client transient pause inbox, e.g. `pause.osric`.
pub fn pause_queue(username: &str) -> String {
    format!("{PAUSE_KEY}.{username}")
}

/// Per-client transient move inbox, e.g. `army_moves.osric`. Doubles as
/// the publish key for that client's moves.
pub fn army_moves_key(username: &str) -> String {
    format!("{ARMY_MOVES_PREFIX}.{username}")
}

/// Binding pattern matching every client's moves.
pub fn army_moves_pattern() -> String {
    format!("{ARMY_MOVES_PREFIX}.*")
}

/// Publish key for a war recognition, suffixed with the attacker's name.
pub fn war_recognitions_key(attacker: &str) -> String {
    format!("{WAR_RECOGNITIONS_PREFIX}.{attacker}")
}

pub fn war_recognitions_pattern() -> String {
    format!("{WAR_RECOGNITIONS_PREFIX}.*")
}

/// Publish key for a game log record.
pub fn game_logs_key(username: &str) -> String {
    format!("{GAME_LOGS_PREFIX}.{username}")
}

pub fn game_logs_pattern() -> String {
    format!("{GAME_LOGS_PREFIX}.*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_builders() {
        assert_eq!(pause_queue("osric"), "pause.osric");
        assert_eq!(army_moves_key("osric"), "army_moves.osric");
        assert_eq!(army_moves_pattern(), "army_moves.*");
        assert_eq!(war_recognitions_key("tully"), "war_recognitions.tully");
        assert_eq!(game_logs_key("osric"), "game_logs.osric");
    }
}
