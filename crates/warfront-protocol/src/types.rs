//! Core wire types for Warfront's message traffic.
//!
//! Everything here is serialized, published to the broker, and
//! deserialized by whichever process consumes it. These are *wire
//! views*: a [`Unit`] on the wire carries no location, because where a
//! unit currently stands is local knowledge of the process that owns it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a unit, allocated locally by the spawning
/// client.
///
/// Newtype over `u64`: you can't accidentally pass a rank where a unit
/// id is expected. `#[serde(transparent)]` keeps the wire form a bare
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// The kind of a unit. Each kind carries a base combat rank, assigned
/// when the unit is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Infantry,
    Cavalry,
    Artillery,
}

impl UnitKind {
    /// The combat rank a freshly spawned unit of this kind receives.
    pub fn base_rank(self) -> u8 {
        match self {
            UnitKind::Infantry => 1,
            UnitKind::Cavalry => 2,
            UnitKind::Artillery => 3,
        }
    }

    /// Parses a kind from a command token (`"infantry"`, `"cavalry"`,
    /// `"artillery"`). Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "infantry" => Some(UnitKind::Infantry),
            "cavalry" => Some(UnitKind::Cavalry),
            "artillery" => Some(UnitKind::Artillery),
            _ => None,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnitKind::Infantry => "infantry",
            UnitKind::Cavalry => "cavalry",
            UnitKind::Artillery => "artillery",
        };
        f.write_str(s)
    }
}

/// A single army unit as seen on the wire: id, kind, and combat rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub rank: u8,
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// The locations armies can occupy.
pub const KNOWN_LOCATIONS: [&str; 6] = [
    "americas",
    "europe",
    "africa",
    "asia",
    "antarctica",
    "australia",
];

/// A map location.
///
/// Deliberately a validated string newtype rather than a closed enum:
/// an unknown location must survive deserialization so the receiving
/// handler can *reject* the move (nack-discard) instead of the decode
/// step blowing up on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Parses a location token, accepting only [`KNOWN_LOCATIONS`].
    pub fn parse(s: &str) -> Option<Self> {
        KNOWN_LOCATIONS
            .contains(&s)
            .then(|| Location(s.to_string()))
    }

    /// Whether this location names a real place on the map. Wire input
    /// may carry anything; handlers check before acting.
    pub fn is_known(&self) -> bool {
        KNOWN_LOCATIONS.contains(&self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// An immutable snapshot of a player: who they are and what units they
/// field. Embedded in every move and war message so receivers can
/// validate and resolve without any shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub username: String,
    pub units: Vec<Unit>,
}

impl PlayerSnapshot {
    /// Looks up a unit in the snapshot by id.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }
}

/// A player relocating a subset of their army.
///
/// Invariant (enforced by the receiving handler, not the type): every
/// id in `unit_ids` must belong to `player`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyMove {
    pub player: PlayerSnapshot,
    pub unit_ids: Vec<UnitId>,
    pub destination: Location,
}

/// Emitted when a move lands on a location already held by another
/// player's units. Both combatants resolve the war independently from
/// the two snapshots — resolution must therefore be deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionOfWar {
    pub attacker: PlayerSnapshot,
    pub defender: PlayerSnapshot,
}

/// An append-only audit record describing a game event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    pub timestamp: DateTime<Utc>,
    pub username: String,
    pub message: String,
}

impl GameLog {
    /// Builds a log record stamped with the current time.
    pub fn now(username: impl Into<String>, message: impl Into<String>) -> Self {
        GameLog {
            timestamp: Utc::now(),
            username: username.into(),
            message: message.into(),
        }
    }
}

/// Broadcast by the moderator server to every client: whether the game
/// is currently paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayingState {
    pub is_paused: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unit_kind_base_ranks_are_ordered() {
        assert!(UnitKind::Infantry.base_rank() < UnitKind::Cavalry.base_rank());
        assert!(UnitKind::Cavalry.base_rank() < UnitKind::Artillery.base_rank());
    }

    #[test]
    fn location_parse_accepts_known_locations_only() {
        assert_eq!(Location::parse("europe"), Some(Location("europe".into())));
        assert_eq!(Location::parse("atlantis"), None);
        assert_eq!(Location::parse(""), None);
    }

    #[test]
    fn unknown_location_survives_deserialization() {
        // The handler must get a chance to discard a bad destination;
        // decoding it is not an error.
        let loc: Location = serde_json::from_str("\"atlantis\"").expect("decodes");
        assert!(!loc.is_known());
    }

    #[test]
    fn snapshot_unit_lookup() {
        let snapshot = PlayerSnapshot {
            username: "kara".into(),
            units: vec![Unit {
                id: UnitId(7),
                kind: UnitKind::Cavalry,
                rank: 2,
            }],
        };
        assert_eq!(snapshot.unit(UnitId(7)).map(|u| u.rank), Some(2));
        assert_eq!(snapshot.unit(UnitId(8)), None);
    }
}
