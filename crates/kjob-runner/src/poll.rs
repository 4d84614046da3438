//! Fixed-interval bounded polling
//!
//! Checks immediately, then once per interval until the check reports done,
//! the check fails, or the timeout elapses. Errors are not retried. Sleeping
//! uses the tokio timer, so dropping the returned future stops the poll.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Default interval between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default ceiling on total wait time
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Shortest interval the poll loop will honour; smaller values are raised to it
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Cadence and ceiling for waiting on a job
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitConfig {
    /// Time between polls
    pub interval: Duration,
    /// Maximum total time to wait
    pub timeout: Duration,
}

impl WaitConfig {
    /// The interval actually slept between polls
    pub fn effective_interval(&self) -> Duration {
        self.interval.max(MIN_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

/// Why a poll stopped without the condition being met
#[derive(Debug, PartialEq, Eq)]
pub enum PollError<E> {
    /// The check failed
    Check(E),
    /// The timeout elapsed
    TimedOut,
}

/// Poll `check_fn` until it returns `Ok(true)`.
///
/// `Ok(false)` keeps polling; `Err` stops immediately. The interval is never
/// shorter than [`MIN_POLL_INTERVAL`]. A timeout too large to represent as a
/// deadline polls without one.
pub async fn poll_until<F, Fut, E>(config: WaitConfig, mut check_fn: F) -> Result<(), PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let interval = config.effective_interval();
    let deadline = Instant::now().checked_add(config.timeout);

    loop {
        match check_fn().await {
            Ok(true) => return Ok(()),
            Ok(false) => trace!("condition not yet met"),
            Err(e) => return Err(PollError::Check(e)),
        }

        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(PollError::TimedOut);
                }
                interval.min(deadline - now)
            }
            None => interval,
        };
        tokio::time::sleep(pause).await;
    }
}
