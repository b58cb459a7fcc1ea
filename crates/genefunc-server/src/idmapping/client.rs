//! HTTP client for the UniProt ID mapping REST API

use async_trait::async_trait;
use genefunc_common::diagnostics::{base64_copy, preview, redact_headers, DEFAULT_PREVIEW_CHARS};
use reqwest::{header::ACCEPT_LANGUAGE, redirect::Policy, Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::config::{UniProtConfig, RESULTS_ACCEPT_LANGUAGE};
use super::error::{IdMappingError, Result};
use super::models::{
    JobHandle, JobStatus, JobStatusReport, MappingRequest, ResultsPage, StatusResponse,
    SubmitForm, SubmitResponse,
};

/// Characters of an unexpected upstream body quoted in error messages.
const ERROR_BODY_CHARS: usize = 256;

/// The three remote operations of the mapping workflow.
///
/// [`IdMappingClient`] is the production implementation; the trait lets the
/// pipeline run against a scripted double in tests.
#[async_trait]
pub trait IdMappingApi: Send + Sync {
    /// Submit a mapping job and return its handle
    async fn submit_job(&self, request: &MappingRequest) -> Result<JobHandle>;

    /// Check the current status of a job once
    async fn job_status(&self, job: &JobHandle) -> Result<JobStatusReport>;

    /// Fetch the raw `results` collection of a finished job
    async fn fetch_results(&self, job: &JobHandle) -> Result<Vec<Value>>;
}

/// reqwest-backed UniProt client
pub struct IdMappingClient {
    client: Client,
    /// Status checks must see UniProt's redirect instead of following it
    status_client: Client,
    config: UniProtConfig,
}

impl IdMappingClient {
    /// Create new client with configuration
    pub fn new(config: UniProtConfig) -> Result<Self> {
        config.validate().map_err(IdMappingError::Config)?;

        let timeout = Duration::from_secs(config.timeout_secs);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| IdMappingError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let status_client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|e| IdMappingError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            status_client,
            config,
        })
    }

    fn log_response_headers(&self, stage: &'static str, response: &Response) {
        if !self.config.log_payloads {
            return;
        }

        let headers = redact_headers(
            response
                .headers()
                .iter()
                .map(|(name, value)| (name.as_str(), value.to_str().unwrap_or("<binary>"))),
        );
        debug!(stage, status = %response.status(), ?headers, "UniProt response headers");
    }

    fn log_body(&self, stage: &'static str, body: &str) {
        if !self.config.log_payloads {
            return;
        }

        debug!(
            stage,
            bytes = body.len(),
            body = %preview(body, DEFAULT_PREVIEW_CHARS),
            body_base64 = %base64_copy(body.as_bytes()),
            "UniProt response body"
        );
    }
}

fn describe_status(status: StatusCode, body: &str) -> String {
    format!(
        "UniProt returned HTTP {}: {}",
        status,
        preview(body.trim(), ERROR_BODY_CHARS)
    )
}

#[async_trait]
impl IdMappingApi for IdMappingClient {
    #[tracing::instrument(skip(self, request), fields(genes = request.gene_list.len(), tax_id = %request.tax_id))]
    async fn submit_job(&self, request: &MappingRequest) -> Result<JobHandle> {
        let form = SubmitForm::from(request);
        debug!(
            from = form.from,
            to = form.to,
            ids = %form.ids,
            tax_id = %form.tax_id,
            "Submitting ID mapping job"
        );

        let response = self
            .client
            .post(self.config.run_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| IdMappingError::Submission(e.to_string()))?;

        self.log_response_headers("submit", &response);
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IdMappingError::Submission(e.to_string()))?;
        self.log_body("submit", &body);

        if !status.is_success() {
            return Err(IdMappingError::Submission(describe_status(status, &body)));
        }

        let parsed: SubmitResponse = serde_json::from_str(&body).map_err(|e| {
            IdMappingError::Submission(format!("Response body is not valid JSON: {}", e))
        })?;

        match parsed.job_id.filter(|id| !id.trim().is_empty()) {
            Some(job_id) => {
                info!(job_id = %job_id, "ID mapping job submitted");
                Ok(JobHandle::new(job_id))
            },
            None => Err(IdMappingError::Submission(format!(
                "Response did not contain a jobId: {}",
                preview(body.trim(), ERROR_BODY_CHARS)
            ))),
        }
    }

    async fn job_status(&self, job: &JobHandle) -> Result<JobStatusReport> {
        let response = self
            .status_client
            .get(self.config.status_url(&job.job_id))
            .send()
            .await
            .map_err(|e| IdMappingError::poll(&job.job_id, e.to_string()))?;

        self.log_response_headers("status", &response);
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IdMappingError::poll(&job.job_id, e.to_string()))?;
        self.log_body("status", &body);

        // A finished job answers with a redirect to its results; that is not a failure.
        if !(status.is_success() || status.is_redirection()) {
            return Err(IdMappingError::poll(&job.job_id, describe_status(status, &body)));
        }

        let parsed: StatusResponse = serde_json::from_str(&body).map_err(|e| {
            IdMappingError::poll(&job.job_id, format!("Response body is not valid JSON: {}", e))
        })?;

        for warning in &parsed.warnings {
            warn!(job_id = %job.job_id, message = %warning.message, "UniProt job warning");
        }

        let job_status = match (parsed.job_status.as_deref(), parsed.results.is_some()) {
            (Some(value), _) => JobStatus::parse(value),
            (None, true) => JobStatus::Finished,
            (None, false) => {
                return Err(IdMappingError::poll(
                    &job.job_id,
                    "Response contained neither jobStatus nor results",
                ))
            },
        };

        Ok(JobStatusReport {
            status: job_status,
            messages: parsed.errors.into_iter().map(|e| e.message).collect(),
        })
    }

    #[tracing::instrument(skip(self, job), fields(job_id = %job))]
    async fn fetch_results(&self, job: &JobHandle) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.config.results_url(&job.job_id))
            .query(&[("format", "json")])
            .header(ACCEPT_LANGUAGE, RESULTS_ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| IdMappingError::results(&job.job_id, e.to_string()))?;

        self.log_response_headers("results", &response);
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IdMappingError::results(&job.job_id, e.to_string()))?;
        self.log_body("results", &body);

        if !status.is_success() {
            return Err(IdMappingError::results(&job.job_id, describe_status(status, &body)));
        }

        let page: ResultsPage = serde_json::from_str(&body).map_err(|e| {
            IdMappingError::results(&job.job_id, format!("Unexpected results body: {}", e))
        })?;

        if !page.failed_ids.is_empty() {
            info!(
                failed = page.failed_ids.len(),
                failed_ids = ?page.failed_ids,
                "UniProt could not map some genes"
            );
        }

        info!(results = page.results.len(), "Fetched mapping results");
        Ok(page.results)
    }
}
