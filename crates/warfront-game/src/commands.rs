//! Interactive command parsing.
//!
//! Pure translation of whitespace-tokenized command lines into state
//! mutations or outbound messages. Errors here are [`GameError`]s:
//! reported to the console by the binary, no network effect.

use std::fmt::Write as _;

use warfront_protocol::{ArmyMove, Location, Unit, UnitId, UnitKind};

use crate::{GameError, GameState};

/// `spawn <location> <unit-kind>` — places a fresh unit on the map.
pub fn command_spawn(state: &mut GameState, words: &[&str]) -> Result<Unit, GameError> {
    let [_, location, kind] = words else {
        return Err(GameError::InvalidCommand(
            "usage: spawn <location> <unit-kind>".into(),
        ));
    };
    let location = Location::parse(location)
        .ok_or_else(|| GameError::UnknownLocation((*location).into()))?;
    let kind =
        UnitKind::parse(kind).ok_or_else(|| GameError::UnknownUnitKind((*kind).into()))?;
    Ok(state.spawn_unit(location, kind))
}

/// `move <location> <unit-id>...` — validates and builds an [`ArmyMove`]
/// for publishing.
///
/// Deliberately does *not* relocate anything: the roster updates when
/// the move comes back through the broker and the move handler accepts
/// it.
pub fn command_move(state: &GameState, words: &[&str]) -> Result<ArmyMove, GameError> {
    let [_, location, ids @ ..] = words else {
        return Err(GameError::InvalidCommand(
            "usage: move <location> <unit-id>...".into(),
        ));
    };
    if ids.is_empty() {
        return Err(GameError::InvalidCommand(
            "usage: move <location> <unit-id>...".into(),
        ));
    }
    let destination = Location::parse(location)
        .ok_or_else(|| GameError::UnknownLocation((*location).into()))?;

    let mut unit_ids = Vec::with_capacity(ids.len());
    for raw in ids {
        // Ids render as `U-3` in the status display; accept that form back.
        let digits = raw.strip_prefix("U-").unwrap_or(raw);
        let id = digits
            .parse::<u64>()
            .map(UnitId)
            .map_err(|_| GameError::InvalidCommand(format!("bad unit id: {raw}")))?;
        if !state.owns(id) {
            return Err(GameError::UnitNotOwned(id));
        }
        unit_ids.push(id);
    }

    Ok(ArmyMove {
        player: state.snapshot(),
        unit_ids,
        destination,
    })
}

/// `status` — a plain-text rendering of the local state.
pub fn command_status(state: &GameState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "player: {}", state.username());
    let _ = writeln!(
        out,
        "game: {}",
        if state.is_paused() { "paused" } else { "playing" }
    );
    let mut any = false;
    for au in state.army() {
        any = true;
        let _ = writeln!(
            out,
            "  {} {} (rank {}) at {}",
            au.unit.id, au.unit.kind, au.unit.rank, au.location
        );
    }
    if !any {
        let _ = writeln!(out, "  no units — try `spawn europe infantry`");
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn spawn_parses_and_places() {
        let mut gs = GameState::new("osric");
        let unit = command_spawn(&mut gs, &["spawn", "europe", "cavalry"]).unwrap();
        assert_eq!(unit.kind, UnitKind::Cavalry);
        assert_eq!(unit.rank, 2);
        assert!(gs.owns(unit.id));
    }

    #[test]
    fn spawn_rejects_bad_input_without_mutating() {
        let mut gs = GameState::new("osric");
        assert!(matches!(
            command_spawn(&mut gs, &["spawn", "atlantis", "cavalry"]),
            Err(GameError::UnknownLocation(_))
        ));
        assert!(matches!(
            command_spawn(&mut gs, &["spawn", "europe", "dragoons"]),
            Err(GameError::UnknownUnitKind(_))
        ));
        assert!(matches!(
            command_spawn(&mut gs, &["spawn", "europe"]),
            Err(GameError::InvalidCommand(_))
        ));
        assert!(gs.snapshot().units.is_empty());
    }

    #[test]
    fn move_builds_an_army_move_without_relocating() {
        let mut gs = GameState::new("osric");
        let unit = command_spawn(&mut gs, &["spawn", "europe", "infantry"]).unwrap();

        let mv = command_move(&gs, &["move", "asia", "1"]).unwrap();
        assert_eq!(mv.player.username, "osric");
        assert_eq!(mv.unit_ids, vec![unit.id]);
        assert_eq!(mv.destination.as_str(), "asia");
        // Still at home until the move is consumed back.
        assert!(gs.has_units_at(&Location::parse("europe").unwrap()));

        // The display form of an id is accepted too.
        let mv = command_move(&gs, &["move", "asia", "U-1"]).unwrap();
        assert_eq!(mv.unit_ids, vec![unit.id]);
    }

    #[test]
    fn move_rejects_unowned_and_unparseable_ids() {
        let mut gs = GameState::new("osric");
        command_spawn(&mut gs, &["spawn", "europe", "infantry"]).unwrap();

        assert!(matches!(
            command_move(&gs, &["move", "asia", "99"]),
            Err(GameError::UnitNotOwned(UnitId(99)))
        ));
        assert!(matches!(
            command_move(&gs, &["move", "asia", "one"]),
            Err(GameError::InvalidCommand(_))
        ));
        assert!(matches!(
            command_move(&gs, &["move", "asia"]),
            Err(GameError::InvalidCommand(_))
        ));
    }

    #[test]
    fn status_mentions_units_and_pause_flag() {
        let mut gs = GameState::new("osric");
        command_spawn(&mut gs, &["spawn", "africa", "artillery"]).unwrap();
        gs.set_paused(true);
        let status = command_status(&gs);
        assert!(status.contains("paused"));
        assert!(status.contains("artillery"));
        assert!(status.contains("africa"));
    }
}
