//! Wire protocol for Warfront.
//!
//! This crate defines the "language" that the player client and the
//! moderator server speak through the broker:
//!
//! - **Types** ([`ArmyMove`], [`RecognitionOfWar`], [`GameLog`], etc.) —
//!   the message structures that travel on the wire.
//! - **Codecs** ([`Codec`] trait, [`JsonCodec`], [`MsgpackCodec`]) — how
//!   those messages are converted to/from bytes. Each message type is
//!   pinned to one codec (see [`routing`]); the choice is never
//!   negotiated at runtime.
//! - **Routing** ([`routing`]) — exchange names and routing-key builders.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! The protocol layer sits below the pub/sub layer: it knows nothing
//! about connections, queues, or acknowledgments — only how to name
//! destinations and shape bytes.

mod codec;
mod error;
pub mod routing;
mod types;

pub use codec::{Codec, JsonCodec, MsgpackCodec};
pub use error::ProtocolError;
pub use types::{
    ArmyMove, GameLog, Location, PlayerSnapshot, PlayingState,
    RecognitionOfWar, Unit, UnitId, UnitKind,
};
