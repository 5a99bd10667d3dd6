//! Handler-driven consumption.
//!
//! Each subscription is an independent Tokio task. Per delivered
//! message the task walks a small state machine:
//!
//! ```text
//! Delivered → Decoding → DecodeFailed (terminal, left unacknowledged)
//!                      → Decoded → Handling → Ack
//!                                           → NackRequeue (redelivery)
//!                                           → NackDiscard (dead-lettered)
//! ```
//!
//! A decode failure is conservative: the malformed message is *not*
//! destroyed — it stays unacknowledged and the broker's redelivery
//! policy governs its fate. An error escaping the handler maps to
//! NackDiscard: unknown errors correlate with poison messages.

use std::future::Future;

use futures_util::StreamExt;
use lapin::Connection;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions};
use lapin::types::FieldTable;
use serde::de::DeserializeOwned;
use warfront_protocol::Codec;

use crate::queue::{QueueType, declare_and_bind};
use crate::PubSubError;

/// What a handler decided about the message it was given.
///
/// Kept as data, not control flow: every handler invocation yields
/// exactly one of these, and the subscriber translates it into the
/// matching acknowledgment primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckDecision {
    /// The message was processed; remove it from the queue.
    Ack,
    /// Processing failed transiently; put it back for redelivery.
    NackRequeue,
    /// The message is unprocessable; reject it into the dead-letter
    /// exchange.
    NackDiscard,
}

/// An unexpected error escaping a handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Maps a handler result onto the decision actually acted on. Errors
/// are fail-safe: discard rather than requeue a message we don't
/// understand.
fn decision_for(result: Result<AckDecision, HandlerError>, queue: &str) -> AckDecision {
    match result {
        Ok(decision) => decision,
        Err(e) => {
            tracing::error!(queue, error = %e, "handler failed, discarding message");
            AckDecision::NackDiscard
        }
    }
}

/// Declares and binds `queue_name`, then spawns a long-running consumer
/// task feeding each decoded message to `handler`.
///
/// Returns once the consumer is registered with the broker; the task
/// runs until the connection closes. Handlers for different queues
/// interleave only at await points, never in parallel on one
/// connection.
pub async fn subscribe<T, C, F, Fut>(
    conn: &Connection,
    exchange: &str,
    queue_name: &str,
    routing_key: &str,
    queue_type: QueueType,
    codec: C,
    mut handler: F,
) -> Result<(), PubSubError>
where
    T: DeserializeOwned + Send + 'static,
    C: Codec,
    F: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = Result<AckDecision, HandlerError>> + Send + 'static,
{
    let (channel, queue) = declare_and_bind(conn, exchange, queue_name, routing_key, queue_type).await?;

    let mut consumer = channel
        .basic_consume(
            queue.name().as_str(),
            &format!("{queue_name}-consumer"),
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await?;

    let queue_name = queue_name.to_string();
    tokio::spawn(async move {
        // The channel must outlive the consumer: acknowledgments settle
        // through it.
        let _channel = channel;
        while let Some(delivery) = consumer.next().await {
            let delivery = match delivery {
                Ok(d) => d,
                Err(e) => {
                    tracing::error!(queue = %queue_name, error = %e, "consumer stream failed");
                    break;
                }
            };

            // Decode failure: log and leave the delivery unacknowledged.
            let value: T = match codec.decode(&delivery.data) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(
                        queue = %queue_name,
                        error = %e,
                        "could not decode delivery, leaving unacknowledged"
                    );
                    continue;
                }
            };

            let decision = decision_for(handler(value).await, &queue_name);
            let outcome = match decision {
                AckDecision::Ack => delivery.ack(BasicAckOptions::default()).await,
                AckDecision::NackRequeue => {
                    delivery
                        .nack(BasicNackOptions {
                            requeue: true,
                            ..BasicNackOptions::default()
                        })
                        .await
                }
                AckDecision::NackDiscard => {
                    delivery
                        .nack(BasicNackOptions {
                            requeue: false,
                            ..BasicNackOptions::default()
                        })
                        .await
                }
            };
            if let Err(e) = outcome {
                tracing::error!(queue = %queue_name, ?decision, error = %e, "acknowledgment failed");
            } else {
                tracing::debug!(queue = %queue_name, ?decision, "message settled");
            }
        }
        tracing::debug!(queue = %queue_name, "consumer task finished");
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_decisions_pass_through() {
        assert_eq!(decision_for(Ok(AckDecision::Ack), "q"), AckDecision::Ack);
        assert_eq!(
            decision_for(Ok(AckDecision::NackRequeue), "q"),
            AckDecision::NackRequeue
        );
        assert_eq!(
            decision_for(Ok(AckDecision::NackDiscard), "q"),
            AckDecision::NackDiscard
        );
    }

    #[test]
    fn handler_errors_map_to_discard() {
        let err: HandlerError = "boom".into();
        assert_eq!(decision_for(Err(err), "q"), AckDecision::NackDiscard);
    }
}
