//! Errors raised by the ID mapping workflow

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdMappingError>;

/// Failure of one stage of the mapping workflow.
///
/// None of these are retried; each aborts the request that triggered it.
#[derive(Error, Debug)]
pub enum IdMappingError {
    #[error("Invalid UniProt client configuration: {0}")]
    Config(String),

    #[error("Failed to submit ID mapping job: {0}")]
    Submission(String),

    #[error("Failed to check status of job {job_id}: {reason}")]
    Poll { job_id: String, reason: String },

    #[error("Job {job_id} still unfinished after {attempts} status checks ({elapsed:?})")]
    PollTimeout {
        job_id: String,
        attempts: u32,
        elapsed: Duration,
    },

    #[error("Job {job_id} ended with status {status}: {}", format_messages(.messages))]
    JobFailed {
        job_id: String,
        status: String,
        messages: Vec<String>,
    },

    #[error("Failed to fetch results for job {job_id}: {reason}")]
    Results { job_id: String, reason: String },

    #[error("Unexpected shape of result item {index}: {reason}")]
    Transform { index: usize, reason: String },
}

fn format_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        "no details reported".to_string()
    } else {
        messages.join("; ")
    }
}

impl IdMappingError {
    pub(crate) fn poll(job_id: &str, reason: impl Into<String>) -> Self {
        Self::Poll {
            job_id: job_id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn results(job_id: &str, reason: impl Into<String>) -> Self {
        Self::Results {
            job_id: job_id.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the error came from talking to UniProt rather than from
    /// our own handling of its output.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Submission(_)
                | Self::Poll { .. }
                | Self::PollTimeout { .. }
                | Self::JobFailed { .. }
                | Self::Results { .. }
        )
    }
}
