//! Codec trait and implementations for serializing/deserializing
//! messages.
//!
//! A codec converts between Rust types and raw bytes. The pub/sub layer
//! doesn't care which format a message uses — it just needs something
//! that implements [`Codec`]. Each message type is pinned to one codec
//! at its call sites: game state and moves travel as JSON (readable in
//! the broker's management UI), audit logs travel as MessagePack
//! (compact, written to disk in bulk).

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because codecs are captured by long-lived
/// consumer tasks that Tokio may run on any thread.
pub trait Codec: Send + Sync + 'static {
    /// The MIME type stamped on published messages
    /// (`content_type` AMQP property).
    fn content_type(&self) -> &'static str;

    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`). Human-readable, used
/// for everything except the audit log.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(|e| ProtocolError::Encode(Box::new(e)))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(|e| ProtocolError::Decode(Box::new(e)))
    }
}

// ---------------------------------------------------------------------------
// MsgpackCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses MessagePack (via `rmp-serde`). Compact binary,
/// used for [`GameLog`](crate::GameLog) records.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgpackCodec;

impl Codec for MsgpackCodec {
    fn content_type(&self) -> &'static str {
        "application/msgpack"
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        rmp_serde::to_vec(value).map_err(|e| ProtocolError::Encode(Box::new(e)))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        rmp_serde::from_slice(data).map_err(|e| ProtocolError::Decode(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ArmyMove, GameLog, Location, PlayerSnapshot, PlayingState, RecognitionOfWar, Unit,
        UnitId, UnitKind,
    };

    fn sample_move() -> ArmyMove {
        ArmyMove {
            player: PlayerSnapshot {
                username: "osric".into(),
                units: vec![
                    Unit { id: UnitId(1), kind: UnitKind::Infantry, rank: 1 },
                    Unit { id: UnitId(2), kind: UnitKind::Artillery, rank: 3 },
                ],
            },
            unit_ids: vec![UnitId(2)],
            destination: Location::parse("asia").unwrap(),
        }
    }

    #[test]
    fn json_round_trip() {
        let codec = JsonCodec;
        let mv = sample_move();
        let decoded: ArmyMove = codec.decode(&codec.encode(&mv).unwrap()).unwrap();
        assert_eq!(mv, decoded);

        let ps = PlayingState { is_paused: true };
        let decoded: PlayingState = codec.decode(&codec.encode(&ps).unwrap()).unwrap();
        assert_eq!(ps, decoded);

        let war = RecognitionOfWar {
            attacker: sample_move().player,
            defender: PlayerSnapshot { username: "tully".into(), units: vec![] },
        };
        let decoded: RecognitionOfWar = codec.decode(&codec.encode(&war).unwrap()).unwrap();
        assert_eq!(war, decoded);

        let log = GameLog::now("osric", "a war started");
        let decoded: GameLog = codec.decode(&codec.encode(&log).unwrap()).unwrap();
        assert_eq!(log, decoded);
    }

    #[test]
    fn msgpack_round_trip() {
        let codec = MsgpackCodec;
        let log = GameLog::now("osric", "osric won a war against tully");
        let decoded: GameLog = codec.decode(&codec.encode(&log).unwrap()).unwrap();
        assert_eq!(log, decoded);

        let mv = sample_move();
        let decoded: ArmyMove = codec.decode(&codec.encode(&mv).unwrap()).unwrap();
        assert_eq!(mv, decoded);

        let ps = PlayingState { is_paused: false };
        let decoded: PlayingState = codec.decode(&codec.encode(&ps).unwrap()).unwrap();
        assert_eq!(ps, decoded);

        let war = RecognitionOfWar {
            attacker: sample_move().player,
            defender: PlayerSnapshot { username: "tully".into(), units: vec![] },
        };
        let decoded: RecognitionOfWar = codec.decode(&codec.encode(&war).unwrap()).unwrap();
        assert_eq!(war, decoded);
    }

    #[test]
    fn decode_failure_is_a_decode_error() {
        let err = JsonCodec.decode::<PlayingState>(b"{not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));

        let err = MsgpackCodec.decode::<GameLog>(&[0xc1]).unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }

    #[test]
    fn content_types() {
        assert_eq!(JsonCodec.content_type(), "application/json");
        assert_eq!(MsgpackCodec.content_type(), "application/msgpack");
    }
}
