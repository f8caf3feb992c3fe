//! PostgreSQL notification listener
//!
//! One dedicated connection per subscription. The listener task runs until the
//! consumer drops or unsubscribes its [`Subscription`], then releases the
//! connection. Lost connections are re-established on the next receive after
//! the configured delay; notifications sent while disconnected are not replayed.

use std::time::Duration;

use party_common::SessionConfig;
use party_core::{
    DomainError, EventSink, RepoResult, Subscription, DEFAULT_SUBSCRIPTION_BUFFER,
};
use sqlx::postgres::{PgListener, PgPool};
use tracing::{debug, error, info, warn};

use crate::repositories::error::map_db_error;

/// Turns a raw notification payload into a typed event
pub type Decoder<E> = fn(&str) -> Result<E, DomainError>;

/// Change feed configuration
#[derive(Debug, Clone)]
pub struct ChangeFeedConfig {
    /// Delay before receiving again after a connection error
    pub reconnect_delay: Duration,
    /// Undelivered events buffered per subscription
    pub buffer: usize,
}

impl Default for ChangeFeedConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_millis(1000),
            buffer: DEFAULT_SUBSCRIPTION_BUFFER,
        }
    }
}

impl From<&SessionConfig> for ChangeFeedConfig {
    fn from(session: &SessionConfig) -> Self {
        Self {
            reconnect_delay: session.listener_reconnect_delay(),
            ..Self::default()
        }
    }
}

/// Start listening on `channel` and return the consumer side of the feed.
///
/// The first connection is made before returning so that an unreachable
/// database surfaces as an error instead of a silent, empty feed.
pub async fn subscribe_channel<E>(
    pool: &PgPool,
    channel: &'static str,
    config: &ChangeFeedConfig,
    decode: Decoder<E>,
) -> RepoResult<Subscription<E>>
where
    E: Send + 'static,
{
    let mut listener = PgListener::connect_with(pool).await.map_err(map_db_error)?;
    listener.listen(channel).await.map_err(map_db_error)?;

    let (sink, subscription) = Subscription::channel(config.buffer);
    tokio::spawn(listener_loop(
        listener,
        channel,
        config.reconnect_delay,
        decode,
        sink,
    ));

    info!(channel, "Change feed subscribed");
    Ok(subscription)
}

/// Background listener loop
async fn listener_loop<E>(
    mut listener: PgListener,
    channel: &'static str,
    reconnect_delay: Duration,
    decode: Decoder<E>,
    sink: EventSink<E>,
) {
    loop {
        match run_listener(&mut listener, channel, decode, &sink).await {
            Ok(()) => {
                info!(channel, "Change feed released");
                break;
            }
            Err(e) => {
                error!(channel, error = %e, "Change feed error, reconnecting...");
                tokio::select! {
                    () = sink.closed() => {
                        info!(channel, "Change feed released");
                        break;
                    }
                    () = tokio::time::sleep(reconnect_delay) => {}
                }
            }
        }
    }
}

/// Forward notifications until the consumer goes away or the connection fails
async fn run_listener<E>(
    listener: &mut PgListener,
    channel: &'static str,
    decode: Decoder<E>,
    sink: &EventSink<E>,
) -> Result<(), sqlx::Error> {
    loop {
        tokio::select! {
            () = sink.closed() => return Ok(()),

            notification = listener.try_recv() => {
                match notification? {
                    Some(notification) => match decode(notification.payload()) {
                        Ok(event) => {
                            if sink.send(event).await.is_err() {
                                return Ok(());
                            }
                            debug!(channel, "Change feed event delivered");
                        }
                        Err(e) => {
                            warn!(channel, error = %e, payload = notification.payload(), "Dropping malformed notification");
                        }
                    },
                    None => {
                        // Reconnects on the next try_recv
                        warn!(channel, "Change feed connection lost, notifications may have been missed");
                    }
                }
            }
        }
    }
}
