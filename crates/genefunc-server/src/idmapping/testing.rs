//! In-process [`IdMappingApi`] double for unit tests

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::time::Instant;

use super::client::IdMappingApi;
use super::error::{IdMappingError, Result};
use super::models::{JobHandle, JobStatus, JobStatusReport, MappingRequest};

enum ScriptedStatus {
    Report(JobStatusReport),
    Error(String),
}

/// Replays scripted responses. Once the status script is exhausted every
/// further check reports `RUNNING`.
pub(crate) struct ScriptedApi {
    job_id: Option<String>,
    statuses: Mutex<VecDeque<ScriptedStatus>>,
    results: Vec<Value>,
    submitted: Mutex<Vec<MappingRequest>>,
    status_times: Mutex<Vec<Instant>>,
    fetch_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            job_id: Some("scripted-job".to_string()),
            statuses: Mutex::new(VecDeque::new()),
            results: Vec::new(),
            submitted: Mutex::new(Vec::new()),
            status_times: Mutex::new(Vec::new()),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_statuses<const N: usize>(self, statuses: [&str; N]) -> Self {
        {
            let mut queue = self.statuses.lock().unwrap();
            for status in statuses {
                queue.push_back(ScriptedStatus::Report(JobStatusReport::new(JobStatus::parse(
                    status,
                ))));
            }
        }
        self
    }

    pub fn with_status_report(self, status: &str, messages: Vec<String>) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .push_back(ScriptedStatus::Report(JobStatusReport {
                status: JobStatus::parse(status),
                messages,
            }));
        self
    }

    pub fn with_status_error(self, reason: &str) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .push_back(ScriptedStatus::Error(reason.to_string()));
        self
    }

    /// Make submission fail as if `jobId` were missing
    pub fn without_job_id(mut self) -> Self {
        self.job_id = None;
        self
    }

    pub fn with_results(mut self, results: Vec<Value>) -> Self {
        self.results = results;
        self
    }

    pub fn submitted(&self) -> Vec<MappingRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.status_times.lock().unwrap().len()
    }

    pub fn status_call_times(&self) -> Vec<Instant> {
        self.status_times.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdMappingApi for ScriptedApi {
    async fn submit_job(&self, request: &MappingRequest) -> Result<JobHandle> {
        self.submitted.lock().unwrap().push(request.clone());
        self.job_id
            .clone()
            .map(JobHandle::new)
            .ok_or_else(|| IdMappingError::Submission("response did not contain a jobId".into()))
    }

    async fn job_status(&self, job: &JobHandle) -> Result<JobStatusReport> {
        self.status_times.lock().unwrap().push(Instant::now());
        let next = self.statuses.lock().unwrap().pop_front();
        match next {
            Some(ScriptedStatus::Report(report)) => Ok(report),
            Some(ScriptedStatus::Error(reason)) => Err(IdMappingError::poll(&job.job_id, reason)),
            None => Ok(JobStatusReport::new(JobStatus::Running)),
        }
    }

    async fn fetch_results(&self, _job: &JobHandle) -> Result<Vec<Value>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }
}
