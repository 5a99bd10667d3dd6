//! Queue declaration, binding, and topology setup.

use lapin::options::{ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions};
use lapin::types::{AMQPValue, FieldTable};
use lapin::{Channel, Connection, ExchangeKind, Queue};
use warfront_protocol::routing::{DEAD_LETTER_QUEUE, EXCHANGE_DIRECT, EXCHANGE_DLX, EXCHANGE_TOPIC};

use crate::PubSubError;

/// The two queue lifetimes this system uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueType {
    /// Shared between consumers, survives broker restart. War
    /// recognitions and game logs.
    Durable,
    /// A per-client inbox: exclusive to its connection and auto-deleted
    /// when the client goes away. Pause and move queues.
    Transient,
}

/// Declare options derived from the queue type. A queue is either fully
/// durable or fully ephemeral; there is no mixed mode.
fn queue_options(queue_type: QueueType) -> QueueDeclareOptions {
    let durable = queue_type == QueueType::Durable;
    QueueDeclareOptions {
        durable,
        exclusive: !durable,
        auto_delete: !durable,
        ..QueueDeclareOptions::default()
    }
}

/// Every application queue routes its discarded/expired messages to the
/// dead-letter exchange instead of silently destroying them.
fn dead_letter_args() -> FieldTable {
    let mut args = FieldTable::default();
    args.insert(
        "x-dead-letter-exchange".into(),
        AMQPValue::LongString(EXCHANGE_DLX.into()),
    );
    args
}

/// Declares `queue_name` on a fresh channel and binds it to `exchange`
/// with `routing_key` (an exact key on direct exchanges, a wildcard
/// pattern on topic exchanges).
///
/// Returns the channel so the caller keeps per-queue flow control: one
/// channel per declared queue, one connection per process.
pub async fn declare_and_bind(
    conn: &Connection,
    exchange: &str,
    queue_name: &str,
    routing_key: &str,
    queue_type: QueueType,
) -> Result<(Channel, Queue), PubSubError> {
    let channel = conn.create_channel().await?;
    let queue = channel
        .queue_declare(queue_name, queue_options(queue_type), dead_letter_args())
        .await?;
    channel
        .queue_bind(
            queue_name,
            exchange,
            routing_key,
            QueueBindOptions::default(),
            FieldTable::default(),
        )
        .await?;
    tracing::debug!(
        exchange,
        queue = queue_name,
        routing_key,
        ?queue_type,
        "declared and bound queue"
    );
    Ok((channel, queue))
}

/// Idempotently declares the three exchanges plus the dead-letter queue.
///
/// Safe for every process to call at startup; the broker treats
/// redeclaration with identical parameters as a no-op.
pub async fn declare_topology(conn: &Connection) -> Result<(), PubSubError> {
    let channel = conn.create_channel().await?;
    let durable = ExchangeDeclareOptions {
        durable: true,
        ..ExchangeDeclareOptions::default()
    };

    channel
        .exchange_declare(EXCHANGE_DIRECT, ExchangeKind::Direct, durable, FieldTable::default())
        .await?;
    channel
        .exchange_declare(EXCHANGE_TOPIC, ExchangeKind::Topic, durable, FieldTable::default())
        .await?;
    channel
        .exchange_declare(EXCHANGE_DLX, ExchangeKind::Fanout, durable, FieldTable::default())
        .await?;

    // The dead-letter queue itself carries no x-dead-letter-exchange
    // argument: a message discarded from it would otherwise cycle.
    channel
        .queue_declare(
            DEAD_LETTER_QUEUE,
            QueueDeclareOptions {
                durable: true,
                ..QueueDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await?;
    channel
        .queue_bind(
            DEAD_LETTER_QUEUE,
            EXCHANGE_DLX,
            "",
            QueueBindOptions::default(),
            FieldTable::default(),
        )
        .await?;

    tracing::info!("broker topology declared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durable_queues_are_shared_and_persistent() {
        let opts = queue_options(QueueType::Durable);
        assert!(opts.durable);
        assert!(!opts.exclusive);
        assert!(!opts.auto_delete);
    }

    #[test]
    fn transient_queues_are_exclusive_inboxes() {
        let opts = queue_options(QueueType::Transient);
        assert!(!opts.durable);
        assert!(opts.exclusive);
        assert!(opts.auto_delete);
    }

    #[test]
    fn every_queue_gets_a_dead_letter_exchange() {
        let args = dead_letter_args();
        let value = args
            .inner()
            .iter()
            .find(|(k, _)| k.as_str() == "x-dead-letter-exchange")
            .map(|(_, v)| v.clone());
        assert_eq!(value, Some(AMQPValue::LongString(EXCHANGE_DLX.into())));
    }
}
