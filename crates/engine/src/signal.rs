// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative stop signal shared by a plant's tasks
//!
//! Tasks race every blocking queue operation against [`StopListener::stopped`],
//! so a stop request wakes a task even while it waits on an empty or full
//! queue. Simulated work already under way is never cut short.

use std::sync::Arc;
use tokio::sync::watch;

/// Sending half: requests every listener to stop
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Ask every listener to stop. Idempotent.
    pub fn request_stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn listener(&self) -> StopListener {
        StopListener {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half held by each task
#[derive(Debug, Clone)]
pub struct StopListener {
    rx: watch::Receiver<bool>,
}

impl StopListener {
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once a stop has been requested (or the signal is gone)
    pub async fn stopped(&mut self) {
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn listener_wakes_on_stop() {
        let signal = StopSignal::new();
        let mut listener = signal.listener();
        assert!(!listener.is_stopped());

        let waiter = tokio::spawn(async move {
            listener.stopped().await;
            listener.is_stopped()
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        signal.request_stop();

        let seen = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(seen);
        assert!(signal.is_stopped());
    }

    #[tokio::test]
    async fn late_listener_sees_earlier_stop() {
        let signal = StopSignal::new();
        signal.request_stop();
        signal.request_stop();

        let mut listener = signal.listener();
        tokio::time::timeout(Duration::from_millis(100), listener.stopped())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn dropped_signal_releases_listeners() {
        let signal = StopSignal::new();
        let mut listener = signal.listener();
        drop(signal);

        tokio::time::timeout(Duration::from_millis(100), listener.stopped())
            .await
            .unwrap();
    }
}
