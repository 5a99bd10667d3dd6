//! Error types for the protocol layer.
//!
//! A `ProtocolError` always means the problem is in serialization or
//! deserialization — never in broker plumbing or game rules. In
//! particular, [`ProtocolError::Decode`] is the signal the pub/sub layer
//! uses to leave a malformed delivery *unacknowledged* instead of
//! crashing or destroying it.

/// Errors that can occur while encoding or decoding a message.
///
/// Both codecs (JSON and MessagePack) funnel into the same two
/// variants so callers deal with one error type regardless of which
/// format a message uses. The boxed source preserves the underlying
/// serde error for logging.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Deserialization failed: malformed payload, missing fields,
    /// wrong types, or a truncated message.
    #[error("decode failed: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
}
