// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded inter-stage queues
//!
//! A stage queue is a FIFO shared by every worker directly upstream and
//! downstream of it. Producers block while the queue is full, consumers
//! block while it is empty. Consumers take turns on the receiving end, so
//! a single consumer always sees items in the order they were put.
//!
//! Closing a queue wakes every blocked producer and consumer. Items already
//! queued can still be taken; after that `take` returns `None`.

use juicer_core::Item;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch, Mutex};

/// Errors from putting an item on a queue
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue is at capacity; the item is handed back
    #[error("queue is full")]
    Full(Item),
    /// The queue was closed; the item is dropped
    #[error("queue is closed")]
    Closed,
}

/// A named, bounded, multi-producer multi-consumer FIFO of oranges
#[derive(Clone)]
pub struct StageQueue {
    name: Arc<str>,
    capacity: usize,
    tx: mpsc::Sender<Item>,
    rx: Arc<Mutex<mpsc::Receiver<Item>>>,
    closed: Arc<watch::Sender<bool>>,
}

impl StageQueue {
    /// Create a queue holding at most `capacity` items (at least one)
    pub fn bounded(name: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            name: Arc::from(name.into()),
            capacity,
            tx,
            rx: Arc::new(Mutex::new(rx)),
            closed: Arc::new(watch::channel(false).0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items currently waiting in the queue
    pub fn len(&self) -> usize {
        self.capacity - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close the queue for every clone. Idempotent.
    pub fn close(&self) {
        if !self.closed.send_replace(true) {
            tracing::debug!(queue = %self.name, remaining = self.len(), "queue closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    async fn wait_closed(&self) {
        let mut closed = self.closed.subscribe();
        let _ = closed.wait_for(|closed| *closed).await;
    }

    /// Put an item at the back, waiting while the queue is full.
    ///
    /// Fails with [`QueueError::Closed`] if the queue is closed before the
    /// item gets a slot.
    pub async fn put(&self, item: Item) -> Result<(), QueueError> {
        tokio::select! {
            biased;
            _ = self.wait_closed() => Err(QueueError::Closed),
            sent = self.tx.send(item) => sent.map_err(|_| QueueError::Closed),
        }
    }

    /// Put an item at the back without waiting
    pub fn try_put(&self, item: Item) -> Result<(), QueueError> {
        if self.is_closed() {
            return Err(QueueError::Closed);
        }
        self.tx.try_send(item).map_err(|e| match e {
            TrySendError::Full(item) => QueueError::Full(item),
            TrySendError::Closed(_) => QueueError::Closed,
        })
    }

    /// Take the front item, waiting while the queue is empty.
    ///
    /// Returns `None` once the queue is closed and drained. Cancel-safe:
    /// dropping the future never loses an item.
    pub async fn take(&self) -> Option<Item> {
        let mut rx = self.rx.lock().await;
        tokio::select! {
            biased;
            item = rx.recv() => return item,
            _ = self.wait_closed() => {}
        }
        rx.try_recv().ok()
    }

    /// Take the front item if one is ready and no other consumer is waiting
    pub fn try_take(&self) -> Option<Item> {
        let mut rx = self.rx.try_lock().ok()?;
        rx.try_recv().ok()
    }
}

impl fmt::Debug for StageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageQueue")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
