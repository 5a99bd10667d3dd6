//! Error types for the pub/sub layer.

use warfront_protocol::ProtocolError;

/// Errors that can occur while talking to the broker.
#[derive(Debug, thiserror::Error)]
pub enum PubSubError {
    /// A connection- or channel-level broker failure. These are fatal to
    /// the process: there is no reconnection strategy by design.
    #[error("broker error: {0}")]
    Broker(#[from] lapin::Error),

    /// The broker negatively acknowledged a publish. The message is not
    /// "sent"; callers must propagate this rather than retry silently.
    #[error("publish to {exchange}/{routing_key} was not confirmed by the broker")]
    PublishNotConfirmed {
        exchange: String,
        routing_key: String,
    },

    /// Encoding the outbound payload failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
