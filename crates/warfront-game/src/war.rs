//! War resolution.
//!
//! Both combatants consume the same `RecognitionOfWar` and resolve it
//! independently, so resolution is a pure function of the two embedded
//! snapshots — no randomness, no local state beyond the receiver's own
//! username. Identical rosters yield identical outcomes on any process.

use std::cmp::Ordering;

use warfront_protocol::{GameLog, PlayerSnapshot, RecognitionOfWar, Unit};
use warfront_pubsub::AckDecision;

use crate::{GamePublisher, GameState};

/// The result of a war, seen from the receiver's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarOutcome {
    /// The receiver is neither attacker nor defender. Must not mutate
    /// state; on a shared queue another consumer may claim the message.
    NotInvolved,
    /// A side has no forces left to fight. Not a loss — nothing to
    /// resolve, nothing to log.
    NoUnits,
    /// The receiver's side won.
    YouWon { winner: String, loser: String },
    /// The receiver's side lost.
    OpponentWon { winner: String, loser: String },
    /// All compared ranks tied and both rosters exhausted together.
    Draw { attacker: String, defender: String },
}

/// Compares two rosters by strongest rank, then next-strongest, and so
/// on; if every compared pair ties, the side with units remaining wins.
///
/// Sorting each side's ranks descending reduces the whole rule to a
/// lexicographic comparison of the two rank vectors.
fn compare_rosters(a: &[Unit], b: &[Unit]) -> Ordering {
    let mut ranks_a: Vec<u8> = a.iter().map(|u| u.rank).collect();
    let mut ranks_b: Vec<u8> = b.iter().map(|u| u.rank).collect();
    ranks_a.sort_unstable_by(|x, y| y.cmp(x));
    ranks_b.sort_unstable_by(|x, y| y.cmp(x));
    ranks_a.cmp(&ranks_b)
}

/// Resolves a war from the perspective of `local_username`.
pub fn resolve_war(recognition: &RecognitionOfWar, local_username: &str) -> WarOutcome {
    let attacker = &recognition.attacker;
    let defender = &recognition.defender;

    let local_is_attacker = attacker.username == local_username;
    let local_is_defender = defender.username == local_username;
    if !local_is_attacker && !local_is_defender {
        return WarOutcome::NotInvolved;
    }

    if attacker.units.is_empty() || defender.units.is_empty() {
        return WarOutcome::NoUnits;
    }

    let (winner, loser) = match compare_rosters(&attacker.units, &defender.units) {
        Ordering::Greater => (attacker, defender),
        Ordering::Less => (defender, attacker),
        Ordering::Equal => {
            return WarOutcome::Draw {
                attacker: attacker.username.clone(),
                defender: defender.username.clone(),
            };
        }
    };

    if winner.username == local_username {
        WarOutcome::YouWon {
            winner: winner.username.clone(),
            loser: loser.username.clone(),
        }
    } else {
        WarOutcome::OpponentWon {
            winner: winner.username.clone(),
            loser: loser.username.clone(),
        }
    }
}

/// The receiver's side of the recognition, if they are in it.
fn local_side<'a>(
    recognition: &'a RecognitionOfWar,
    local_username: &str,
) -> Option<&'a PlayerSnapshot> {
    [&recognition.attacker, &recognition.defender]
        .into_iter()
        .find(|side| side.username == local_username)
}

/// Processes a received war recognition and returns an acknowledgment
/// decision.
///
/// - NotInvolved → NackRequeue (another eligible consumer on the shared
///   queue may claim it; state untouched).
/// - NoUnits → NackDiscard, no GameLog.
/// - Resolved → combat applies (the losing side withdraws its fallen
///   units from its local roster), then a GameLog goes out through the
///   confirmed path: Ack on publish success, NackRequeue otherwise.
pub async fn handle_war<P: GamePublisher>(
    state: &mut GameState,
    publisher: &P,
    recognition: RecognitionOfWar,
) -> AckDecision {
    // Every resolved arm produces the audit line itself, so only wars
    // that actually happened ever reach the publish below.
    let message = match resolve_war(&recognition, state.username()) {
        WarOutcome::NotInvolved => {
            tracing::debug!(
                attacker = %recognition.attacker.username,
                defender = %recognition.defender.username,
                "war does not involve us, requeueing"
            );
            return AckDecision::NackRequeue;
        }
        WarOutcome::NoUnits => {
            tracing::info!("war with an empty roster, discarding");
            return AckDecision::NackDiscard;
        }
        WarOutcome::OpponentWon { winner, loser } => {
            // We lost: the units we committed to the war are gone.
            if let Some(side) = local_side(&recognition, state.username()) {
                let fallen: Vec<_> = side.units.iter().map(|u| u.id).collect();
                state.remove_units(fallen);
            }
            tracing::info!(%winner, %loser, "war lost");
            format!("{winner} won a war against {loser}")
        }
        WarOutcome::YouWon { winner, loser } => {
            tracing::info!(%winner, %loser, "war won");
            format!("{winner} won a war against {loser}")
        }
        WarOutcome::Draw { attacker, defender } => {
            tracing::info!("war ended in a draw");
            format!("A war between {attacker} and {defender} resulted in a draw")
        }
    };

    let log = GameLog::now(state.username(), message);
    match publisher.publish_game_log(&log).await {
        Ok(()) => AckDecision::Ack,
        Err(e) => {
            tracing::warn!(error = %e, "game log not confirmed, requeueing war");
            AckDecision::NackRequeue
        }
    }
}
