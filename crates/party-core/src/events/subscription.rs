//! Cancellable event subscription
//!
//! A store adapter keeps the [`EventSink`] inside its listener task and hands
//! the [`Subscription`] to the consumer. Dropping (or explicitly
//! unsubscribing) the consumer side closes the channel, which the listener
//! observes through [`EventSink::closed`] and uses to release its connection.

use tokio::sync::mpsc;

use crate::error::DomainError;

/// Default number of undelivered events buffered per subscription
pub const DEFAULT_SUBSCRIPTION_BUFFER: usize = 256;

/// Consumer side of a live event feed
#[derive(Debug)]
pub struct Subscription<E> {
    events: mpsc::Receiver<E>,
}

/// Producer side of a live event feed
#[derive(Debug)]
pub struct EventSink<E> {
    tx: mpsc::Sender<E>,
}

impl<E> Clone for EventSink<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> Subscription<E> {
    /// Create a connected sink/subscription pair
    pub fn channel(buffer: usize) -> (EventSink<E>, Self) {
        let (tx, events) = mpsc::channel(buffer.max(1));
        (EventSink { tx }, Self { events })
    }

    /// Wait for the next event; `None` once the producer has gone away
    pub async fn recv(&mut self) -> Option<E> {
        self.events.recv().await
    }

    /// Take an already-delivered event without waiting
    pub fn try_recv(&mut self) -> Option<E> {
        self.events.try_recv().ok()
    }

    /// Stop the feed. The producer's listener is released on its next poll.
    pub fn unsubscribe(mut self) {
        self.events.close();
    }
}

impl<E> EventSink<E> {
    /// Deliver one event
    pub async fn send(&self, event: E) -> Result<(), DomainError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| DomainError::SubscriptionClosed)
    }

    /// Resolves once the consumer unsubscribed or was dropped
    pub async fn closed(&self) {
        self.tx.closed().await;
    }

    /// Whether the consumer is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
