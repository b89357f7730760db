//! Cancellation signalling for long-running waits.

use tokio::sync::watch;

/// Owner side of a cancellation signal.
///
/// Hands out [`CancelToken`]s that every polling loop can select on. Once
/// triggered the signal stays set, so tokens created afterwards observe it too.
pub struct Cancellation {
    tx: watch::Sender<bool>,
}

impl Cancellation {
    /// Create a new, untriggered cancellation source.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Get a token observing this source.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: Some(self.tx.subscribe()),
        }
    }

    /// Trigger cancellation.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Whether cancellation has been triggered.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self { rx: None }
    }

    /// Whether cancellation has been triggered.
    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
    }

    /// Resolve once cancellation is triggered; pend forever otherwise.
    ///
    /// Dropping the [`Cancellation`] without triggering it never resolves.
    pub async fn cancelled(&self) {
        if let Some(rx) = &self.rx {
            let mut rx = rx.clone();
            let triggered = rx.wait_for(|cancelled| *cancelled).await.is_ok();
            if triggered {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}
