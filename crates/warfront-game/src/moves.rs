//! Army-move handler.
//!
//! Every client consumes every client's moves (topic binding
//! `army_moves.*`), including its own echoed back through the broker.
//! The roster therefore updates when a move is *consumed*, not when it
//! is typed — acceptance through the broker is what relocates units.

use warfront_protocol::{ArmyMove, RecognitionOfWar};
use warfront_pubsub::AckDecision;

use crate::{GamePublisher, GameState};

/// What a received move means from this process's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move references units its mover doesn't own or names an
    /// unknown destination. Unprocessable anywhere.
    Invalid { reason: String },
    /// Nothing to fight over. Our own move: relocate. Someone else's:
    /// no concern of ours.
    Safe,
    /// Another player's relocation landed on a location we hold.
    MakeWar(RecognitionOfWar),
}

/// Classifies a move against local state without mutating anything.
pub fn evaluate_move(state: &GameState, mv: &ArmyMove) -> MoveOutcome {
    // A move relocating nothing lands nothing, so nothing can be
    // contested. Acknowledge it as a no-op.
    if mv.unit_ids.is_empty() {
        return MoveOutcome::Safe;
    }
    if !mv.destination.is_known() {
        return MoveOutcome::Invalid {
            reason: format!("unknown destination: {}", mv.destination),
        };
    }
    // Every referenced unit must belong to the mover's own snapshot.
    if let Some(id) = mv.unit_ids.iter().find(|id| mv.player.unit(**id).is_none()) {
        return MoveOutcome::Invalid {
            reason: format!("unit {id} does not belong to {}", mv.player.username),
        };
    }

    if mv.player.username == state.username() {
        // Our own move coming back: it must still match the live roster.
        if let Some(id) = mv.unit_ids.iter().find(|id| !state.owns(**id)) {
            return MoveOutcome::Invalid {
                reason: format!("unit {id} is no longer in the local roster"),
            };
        }
        return MoveOutcome::Safe;
    }

    if state.has_units_at(&mv.destination) {
        MoveOutcome::MakeWar(RecognitionOfWar {
            attacker: mv.player.clone(),
            defender: state.snapshot(),
        })
    } else {
        MoveOutcome::Safe
    }
}

/// Processes a received move and returns the acknowledgment decision.
///
/// - Invalid → NackDiscard (dead-lettered; poison for every consumer).
/// - Safe → relocate if it is our own move, then Ack.
/// - MakeWar → publish the recognition through the confirmed path; Ack
///   on success, NackRequeue on publish failure so the move is retried.
pub async fn handle_move<P: GamePublisher>(
    state: &mut GameState,
    publisher: &P,
    mv: ArmyMove,
) -> AckDecision {
    match evaluate_move(state, &mv) {
        MoveOutcome::Invalid { reason } => {
            tracing::warn!(mover = %mv.player.username, %reason, "discarding invalid move");
            AckDecision::NackDiscard
        }
        MoveOutcome::Safe => {
            if mv.player.username == state.username() {
                state.relocate(&mv.unit_ids, &mv.destination);
                tracing::info!(
                    destination = %mv.destination,
                    units = mv.unit_ids.len(),
                    "army relocated"
                );
            } else {
                tracing::debug!(
                    mover = %mv.player.username,
                    destination = %mv.destination,
                    "move observed, no contest"
                );
            }
            AckDecision::Ack
        }
        MoveOutcome::MakeWar(recognition) => {
            tracing::info!(
                attacker = %recognition.attacker.username,
                location = %mv.destination,
                "move contested, declaring war"
            );
            match publisher.publish_war(&recognition).await {
                Ok(()) => AckDecision::Ack,
                Err(e) => {
                    tracing::warn!(error = %e, "war recognition not confirmed, requeueing move");
                    AckDecision::NackRequeue
                }
            }
        }
    }
}
