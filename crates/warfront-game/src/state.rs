//! Per-process game state.

use std::collections::BTreeMap;

use warfront_protocol::{Location, PlayerSnapshot, Unit, UnitId, UnitKind};

/// A unit together with its current position. The position is local
/// knowledge only and never travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmyUnit {
    pub unit: Unit,
    pub location: Location,
}

/// The per-process aggregate: who this player is, the units they
/// command, and whether the game is paused.
///
/// Exclusively owned by the orchestrating binary (behind a mutex) and
/// mutated only by command handlers. Discarded on process exit — there
/// is no persistence across restarts.
#[derive(Debug)]
pub struct GameState {
    username: String,
    units: BTreeMap<UnitId, ArmyUnit>,
    paused: bool,
    next_unit_id: u64,
}

impl GameState {
    pub fn new(username: impl Into<String>) -> Self {
        GameState {
            username: username.into(),
            units: BTreeMap::new(),
            paused: false,
            next_unit_id: 1,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Allocates the next unit id and places a fresh unit of `kind` at
    /// `location`. The unit's rank is the kind's base rank.
    pub fn spawn_unit(&mut self, location: Location, kind: UnitKind) -> Unit {
        let unit = Unit {
            id: UnitId(self.next_unit_id),
            kind,
            rank: kind.base_rank(),
        };
        self.next_unit_id += 1;
        self.units.insert(unit.id, ArmyUnit { unit, location });
        unit
    }

    pub fn owns(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Whether any local unit currently stands at `location`.
    pub fn has_units_at(&self, location: &Location) -> bool {
        self.units.values().any(|au| &au.location == location)
    }

    /// Moves the given units (all of which must be owned) to
    /// `destination`. Unknown ids are ignored; callers validate first.
    pub fn relocate(&mut self, ids: &[UnitId], destination: &Location) {
        for id in ids {
            if let Some(au) = self.units.get_mut(id) {
                au.location = destination.clone();
            }
        }
    }

    /// Removes units from the roster, e.g. the fallen side of a war.
    pub fn remove_units<I: IntoIterator<Item = UnitId>>(&mut self, ids: I) {
        for id in ids {
            self.units.remove(&id);
        }
    }

    /// The immutable wire view of this player: username plus units,
    /// positions stripped.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            username: self.username.clone(),
            units: self.units.values().map(|au| au.unit).collect(),
        }
    }

    /// Units with their positions, in id order. For the status display.
    pub fn army(&self) -> impl Iterator<Item = &ArmyUnit> {
        self.units.values()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    #[test]
    fn spawn_allocates_sequential_ids_and_base_ranks() {
        let mut gs = GameState::new("osric");
        let a = gs.spawn_unit(loc("europe"), UnitKind::Infantry);
        let b = gs.spawn_unit(loc("asia"), UnitKind::Artillery);
        assert_eq!(a.id, UnitId(1));
        assert_eq!(b.id, UnitId(2));
        assert_eq!(a.rank, 1);
        assert_eq!(b.rank, 3);
        assert!(gs.owns(a.id));
        assert!(gs.has_units_at(&loc("asia")));
    }

    #[test]
    fn relocate_moves_only_named_units() {
        let mut gs = GameState::new("osric");
        let a = gs.spawn_unit(loc("europe"), UnitKind::Infantry);
        let b = gs.spawn_unit(loc("europe"), UnitKind::Cavalry);
        gs.relocate(&[a.id], &loc("africa"));
        assert!(gs.has_units_at(&loc("africa")));
        assert!(gs.has_units_at(&loc("europe")));
        gs.relocate(&[b.id], &loc("africa"));
        assert!(!gs.has_units_at(&loc("europe")));
    }

    #[test]
    fn snapshot_strips_positions() {
        let mut gs = GameState::new("osric");
        let u = gs.spawn_unit(loc("australia"), UnitKind::Cavalry);
        let snapshot = gs.snapshot();
        assert_eq!(snapshot.username, "osric");
        assert_eq!(snapshot.units, vec![u]);
    }

    #[test]
    fn remove_units_drops_from_roster() {
        let mut gs = GameState::new("osric");
        let a = gs.spawn_unit(loc("europe"), UnitKind::Infantry);
        gs.remove_units([a.id]);
        assert!(!gs.owns(a.id));
        assert!(gs.snapshot().units.is_empty());
    }
}
