//! Block height polling.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::chain::transport::Transport;
use crate::error::{ClientError, ClientResult};
use crate::lifecycle::CancelToken;
use crate::observability::metrics;
use crate::resilience::{poll_until, Attempt, PollError, PollPolicy};

/// Default interval between two status reads.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Waits for the chain to reach a block height.
#[derive(Clone)]
pub struct BlockHeightWaiter {
    transport: Arc<dyn Transport>,
    node_address: String,
    interval: Duration,
}

impl BlockHeightWaiter {
    pub fn new(transport: Arc<dyn Transport>, node_address: impl Into<String>) -> Self {
        Self {
            transport,
            node_address: node_address.into(),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Latest committed block height.
    pub async fn latest_block_height(&self) -> ClientResult<i64> {
        let status = self.transport.status().await.map_err(|source| ClientError::Rpc {
            node: self.node_address.clone(),
            source,
        })?;
        Ok(status.latest_block_height)
    }

    /// Wait until block `height` is committed.
    ///
    /// Fails with [`ClientError::BlockTimeout`] once `timeout` elapses and with
    /// [`ClientError::Cancelled`] as soon as `cancel` fires. Status errors are
    /// returned as-is without retry.
    pub async fn wait_for_height(
        &self,
        height: i64,
        timeout: Duration,
        cancel: &CancelToken,
    ) -> ClientResult<()> {
        let last_seen = &AtomicI64::new(0);
        let policy = PollPolicy::new(self.interval, timeout);

        let result = poll_until(policy, cancel, move || async move {
            match self.latest_block_height().await {
                Ok(current) => {
                    last_seen.store(current, Ordering::SeqCst);
                    if current >= height {
                        Attempt::Ready(current)
                    } else {
                        tracing::debug!(current, target = height, "Waiting for block");
                        Attempt::NotYet(None)
                    }
                }
                Err(e) => Attempt::Fatal(e),
            }
        })
        .await;

        match result {
            Ok(reached) => {
                tracing::debug!(height = reached, target = height, "Block height reached");
                metrics::record_block_wait("reached");
                Ok(())
            }
            Err(PollError::Timeout { elapsed, .. }) => {
                metrics::record_block_wait("timeout");
                Err(ClientError::BlockTimeout {
                    target: height,
                    last_height: last_seen.load(Ordering::SeqCst),
                    waited: elapsed,
                })
            }
            Err(PollError::Cancelled) => {
                metrics::record_block_wait("cancelled");
                Err(ClientError::Cancelled)
            }
            Err(PollError::Fatal(e)) => {
                metrics::record_block_wait("error");
                Err(e)
            }
        }
    }

    /// Wait for `n` blocks on top of the current height.
    pub async fn wait_for_n_blocks(
        &self,
        n: i64,
        timeout: Duration,
        cancel: &CancelToken,
    ) -> ClientResult<()> {
        let start = self.latest_block_height().await?;
        let target = start.checked_add(n).ok_or_else(|| {
            ClientError::Config(format!("block height {} + {} is out of range", start, n))
        })?;
        self.wait_for_height(target, timeout, cancel).await
    }

    /// Wait for the next block to be committed.
    pub async fn wait_for_next_block(&self, timeout: Duration, cancel: &CancelToken) -> ClientResult<()> {
        self.wait_for_n_blocks(1, timeout, cancel).await
    }
}

impl std::fmt::Debug for BlockHeightWaiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockHeightWaiter")
            .field("node_address", &self.node_address)
            .field("interval", &self.interval)
            .finish()
    }
}
