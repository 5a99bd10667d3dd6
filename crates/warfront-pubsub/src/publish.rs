//! Confirmed publishing.

use lapin::options::{BasicPublishOptions, ConfirmSelectOptions};
use lapin::publisher_confirm::Confirmation;
use lapin::{BasicProperties, Channel, Connection};
use serde::Serialize;
use warfront_protocol::Codec;

use crate::PubSubError;

/// A publishing handle over a confirm-mode channel.
///
/// Every publish waits for the broker's publisher confirm before
/// returning: a domain action is not "sent" until the broker owns it.
/// A negative confirm surfaces as [`PubSubError::PublishNotConfirmed`]
/// and must be propagated by the caller, never swallowed. The wait has
/// no timeout (inherited design gap).
pub struct Publisher {
    channel: Channel,
}

impl Publisher {
    /// Opens a dedicated channel on `conn` and puts it in confirm mode.
    pub async fn new(conn: &Connection) -> Result<Self, PubSubError> {
        let channel = conn.create_channel().await?;
        channel.confirm_select(ConfirmSelectOptions::default()).await?;
        Ok(Publisher { channel })
    }

    /// Encodes `value` with `codec` and publishes it, returning only
    /// after broker confirmation.
    pub async fn publish<T, C>(
        &self,
        codec: &C,
        exchange: &str,
        routing_key: &str,
        value: &T,
    ) -> Result<(), PubSubError>
    where
        T: Serialize,
        C: Codec,
    {
        let payload = codec.encode(value)?;
        let confirmation = self
            .channel
            .basic_publish(
                exchange,
                routing_key,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_content_type(codec.content_type().into()),
            )
            .await?
            .await?;

        match confirmation {
            Confirmation::Ack(_) | Confirmation::NotRequested => {
                tracing::debug!(exchange, routing_key, bytes = payload.len(), "published");
                Ok(())
            }
            Confirmation::Nack(_) => Err(PubSubError::PublishNotConfirmed {
                exchange: exchange.to_string(),
                routing_key: routing_key.to_string(),
            }),
        }
    }
}
