//! The confirmed-publish seam handlers cascade through.

use warfront_protocol::{GameLog, RecognitionOfWar};
use warfront_pubsub::PubSubError;

/// The outbound messages a handler may need to emit while processing
/// an inbound one.
///
/// A trait rather than a concrete publisher so the handlers stay
/// independently testable: tests plug in a publisher that rejects, and
/// verify the handlers convert the failure into the right
/// acknowledgment decision instead of crashing.
pub trait GamePublisher: Send + Sync {
    /// Publishes a war recognition to the attacker's war topic. Returns
    /// only after broker confirmation.
    async fn publish_war(&self, recognition: &RecognitionOfWar) -> Result<(), PubSubError>;

    /// Publishes an audit record to this player's game-log topic
    /// (binary format). Returns only after broker confirmation.
    async fn publish_game_log(&self, log: &GameLog) -> Result<(), PubSubError>;
}
