//! The moderator's audit-log handler.

use warfront_protocol::GameLog;
use warfront_pubsub::AckDecision;

/// The append-only audit sink the moderator server writes through.
///
/// A trait so the handler can be tested against a failing writer; the
/// server binary provides a file-backed implementation.
pub trait GameLogWriter: Send {
    /// Appends one record. An `Err` means the record was not durably
    /// written.
    fn append(&mut self, log: &GameLog) -> std::io::Result<()>;
}

/// Appends a received game log. A write failure requeues the record —
/// the broker still owns it until the disk does.
pub fn handle_game_log<W: GameLogWriter>(writer: &mut W, log: GameLog) -> AckDecision {
    match writer.append(&log) {
        Ok(()) => {
            tracing::info!(username = %log.username, message = %log.message, "game log recorded");
            AckDecision::Ack
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not append game log, requeueing");
            AckDecision::NackRequeue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recording(Vec<GameLog>);

    impl GameLogWriter for Recording {
        fn append(&mut self, log: &GameLog) -> std::io::Result<()> {
            self.0.push(log.clone());
            Ok(())
        }
    }

    struct BrokenDisk;

    impl GameLogWriter for BrokenDisk {
        fn append(&mut self, _log: &GameLog) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn successful_append_acks() {
        let mut writer = Recording(Vec::new());
        let d = handle_game_log(&mut writer, GameLog::now("osric", "won"));
        assert_eq!(d, AckDecision::Ack);
        assert_eq!(writer.0.len(), 1);
    }

    #[test]
    fn failed_append_requeues() {
        let d = handle_game_log(&mut BrokenDisk, GameLog::now("osric", "won"));
        assert_eq!(d, AckDecision::NackRequeue);
    }
}
