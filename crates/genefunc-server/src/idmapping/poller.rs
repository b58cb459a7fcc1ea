//! Job status polling
//!
//! UniProt runs a mapping as an asynchronous job. [`wait_for_completion`]
//! checks its status, sleeping between checks according to a [`PollPolicy`],
//! until the job is `FINISHED`, reports a terminal failure, or the policy's
//! attempt/time budget runs out.
//!
//! The first status check is issued immediately after submission. The loop
//! returns on the first `FINISHED` it observes and never before.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::client::IdMappingApi;
use super::error::{IdMappingError, Result};
use super::models::{JobHandle, JobStatus};

/// Wait between status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Upper bound on status checks for one job.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 300;

/// Upper bound on total time spent polling one job.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(300);

pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(10);

/// How the wait between status checks evolves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Backoff {
    /// Always wait `interval`
    Fixed,
    /// Wait `interval * factor^(n-1)` after the n-th check, capped at `max_interval`
    Exponential { factor: f64, max_interval: Duration },
}

/// Bounded polling policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollPolicy {
    pub interval: Duration,
    pub backoff: Backoff,
    /// Maximum number of status checks, including the first
    pub max_attempts: u32,
    /// Maximum time between the first check and giving up
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            backoff: Backoff::Fixed,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

impl PollPolicy {
    /// Fixed-interval policy
    pub fn fixed(interval: Duration, max_attempts: u32, timeout: Duration) -> Self {
        Self {
            interval,
            backoff: Backoff::Fixed,
            max_attempts,
            timeout,
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Delay to wait after the `attempt`-th (1-based) unfinished status check.
    ///
    /// Never shorter than `interval`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential {
                factor,
                max_interval,
            } => {
                let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                let scaled = self.interval.as_secs_f64() * factor.powi(exponent);
                let capped = scaled.min(max_interval.as_secs_f64());
                Duration::from_secs_f64(capped).max(self.interval)
            },
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.interval.is_zero() {
            return Err("Poll interval must be greater than 0".to_string());
        }

        if self.max_attempts == 0 {
            return Err("Poll max_attempts must be at least 1".to_string());
        }

        if self.timeout < self.interval {
            return Err(format!(
                "Poll timeout ({:?}) must not be shorter than the poll interval ({:?})",
                self.timeout, self.interval
            ));
        }

        if let Backoff::Exponential {
            factor,
            max_interval,
        } = self.backoff
        {
            if !factor.is_finite() || factor < 1.0 {
                return Err(format!("Backoff factor must be a finite number >= 1, got {}", factor));
            }

            if max_interval < self.interval {
                return Err(format!(
                    "Backoff max interval ({:?}) must not be shorter than the poll interval ({:?})",
                    max_interval, self.interval
                ));
            }
        }

        Ok(())
    }
}

/// Poll `job` until it finishes.
///
/// Returns the number of status checks made.
///
/// # Errors
///
/// - [`IdMappingError::Poll`] when a status check itself fails (not retried)
/// - [`IdMappingError::JobFailed`] when UniProt reports a terminal status
///   other than `FINISHED`
/// - [`IdMappingError::PollTimeout`] when `max_attempts` or `timeout` is exhausted
#[tracing::instrument(skip(api, job, policy), fields(job_id = %job))]
pub async fn wait_for_completion<A>(api: &A, job: &JobHandle, policy: &PollPolicy) -> Result<u32>
where
    A: IdMappingApi + ?Sized,
{
    let started = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let report = api.job_status(job).await?;

        match report.status {
            JobStatus::Finished => {
                info!(attempts = attempt, elapsed = ?started.elapsed(), "Job finished");
                return Ok(attempt);
            },
            JobStatus::New | JobStatus::Running => {},
            status => {
                warn!(%status, messages = ?report.messages, "Job ended without results");
                return Err(IdMappingError::JobFailed {
                    job_id: job.job_id.clone(),
                    status: status.to_string(),
                    messages: report.messages,
                });
            },
        }

        let elapsed = started.elapsed();
        let delay = policy.delay_for(attempt);

        if attempt >= policy.max_attempts || elapsed + delay > policy.timeout {
            warn!(attempts = attempt, ?elapsed, "Giving up on job");
            return Err(IdMappingError::PollTimeout {
                job_id: job.job_id.clone(),
                attempts: attempt,
                elapsed,
            });
        }

        debug!(attempt, status = %report.status, ?delay, "Job not finished yet");
        tokio::time::sleep(delay).await;
    }
}
