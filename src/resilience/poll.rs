//! Fixed-interval polling bounded by a deadline.

use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use crate::lifecycle::CancelToken;

/// Shortest interval a loop ticks at; shorter requested intervals are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Interval and overall deadline for a polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between two probes.
    pub interval: Duration,
    /// Total time allowed, including in-flight probes.
    pub timeout: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// Outcome of a single probe.
#[derive(Debug)]
pub enum Attempt<T, E> {
    /// Condition met; stop polling.
    Ready(T),
    /// Not there yet; poll again. Carries the reason, if any.
    NotYet(Option<E>),
    /// Stop polling and propagate.
    Fatal(E),
}

/// Why a polling loop stopped without a result.
#[derive(Debug)]
pub enum PollError<E> {
    /// The deadline elapsed. Carries the last reason reported by a probe.
    Timeout { last: Option<E>, elapsed: Duration },
    /// The cancellation token fired.
    Cancelled,
    /// A probe reported a fatal error.
    Fatal(E),
}

/// Run `probe` immediately and then once per interval until it is ready.
///
/// Each wait selects between cancellation, the deadline, and the next tick,
/// in that order of precedence. A probe that completes is always evaluated,
/// even once the deadline has passed; a hung probe is still cut off by the
/// deadline or cancellation. Intervals below [`MIN_POLL_INTERVAL`] are raised
/// to it.
pub async fn poll_until<T, E, F, Fut>(
    policy: PollPolicy,
    cancel: &CancelToken,
    mut probe: F,
) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T, E>>,
{
    let started = Instant::now();
    let deadline = sleep(policy.timeout);
    tokio::pin!(deadline);

    let interval = policy.interval.max(MIN_POLL_INTERVAL);
    let mut ticker = interval_at(started + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last = None;

    loop {
        if cancel.is_cancelled() {
            return Err(PollError::Cancelled);
        }

        let attempt = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            attempt = probe() => attempt,
            _ = &mut deadline => {
                return Err(PollError::Timeout { last, elapsed: started.elapsed() });
            }
        };

        match attempt {
            Attempt::Ready(value) => return Ok(value),
            Attempt::Fatal(e) => return Err(PollError::Fatal(e)),
            Attempt::NotYet(reason) => {
                if reason.is_some() {
                    last = reason;
                }
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            _ = &mut deadline => {
                return Err(PollError::Timeout { last, elapsed: started.elapsed() });
            }
            _ = ticker.tick() => {}
        }
    }
}
