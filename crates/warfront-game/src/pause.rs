//! Pause handler.

use warfront_protocol::PlayingState;
use warfront_pubsub::AckDecision;

use crate::GameState;

/// Replaces the local pause flag unconditionally. Always acks: a pause
/// broadcast cannot be invalid.
pub fn handle_pause(state: &mut GameState, playing: PlayingState) -> AckDecision {
    state.set_paused(playing.is_paused);
    if playing.is_paused {
        tracing::info!("game paused");
    } else {
        tracing::info!("game resumed");
    }
    AckDecision::Ack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_and_resume_always_ack() {
        let mut gs = GameState::new("osric");
        assert!(!gs.is_paused());

        let d = handle_pause(&mut gs, PlayingState { is_paused: true });
        assert_eq!(d, AckDecision::Ack);
        assert!(gs.is_paused());

        let d = handle_pause(&mut gs, PlayingState { is_paused: false });
        assert_eq!(d, AckDecision::Ack);
        assert!(!gs.is_paused());
    }
}
