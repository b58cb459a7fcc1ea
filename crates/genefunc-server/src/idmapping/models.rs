//! ID mapping data types
//!
//! Request/response bodies of the UniProt ID mapping REST API plus the
//! condensed [`CommentSummary`] returned to our callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source identifier type submitted with every job.
pub const FROM_DB: &str = "Gene_Name";

/// Target identifier type submitted with every job.
pub const TO_DB: &str = "UniProtKB-Swiss-Prot";

/// `commentType` of free-text protein function annotations.
pub const FUNCTION_COMMENT: &str = "FUNCTION";

/// NCBI taxonomy identifier (always positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(u64);

impl TaxId {
    /// Homo sapiens
    pub const HUMAN: TaxId = TaxId(9606);

    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated mapping request.
///
/// Gene order and duplicates are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRequest {
    pub gene_list: Vec<String>,
    pub tax_id: TaxId,
}

impl MappingRequest {
    pub fn new(gene_list: Vec<String>, tax_id: TaxId) -> Self {
        Self { gene_list, tax_id }
    }

    /// Gene list as the comma-joined `ids` form field
    pub fn ids(&self) -> String {
        self.gene_list.join(",")
    }
}

/// Form body of `POST /idmapping/run`. Field order is the wire order.
#[derive(Debug, Serialize)]
pub(crate) struct SubmitForm {
    pub from: &'static str,
    pub to: &'static str,
    pub ids: String,
    #[serde(rename = "taxId")]
    pub tax_id: String,
}

impl From<&MappingRequest> for SubmitForm {
    fn from(request: &MappingRequest) -> Self {
        Self {
            from: FROM_DB,
            to: TO_DB,
            ids: request.ids(),
            tax_id: request.tax_id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitResponse {
    pub job_id: Option<String>,
}

/// Opaque identifier of a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle {
    pub job_id: String,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.job_id)
    }
}

/// Job state reported by `GET /idmapping/status/{jobId}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    New,
    Running,
    Finished,
    Error,
    /// Any value UniProt documents in the future; treated as a terminal failure
    Unknown(String),
}

impl JobStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "NEW" => Self::New,
            "RUNNING" => Self::Running,
            "FINISHED" => Self::Finished,
            "ERROR" => Self::Error,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::New | Self::Running)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("NEW"),
            Self::Running => f.write_str("RUNNING"),
            Self::Finished => f.write_str("FINISHED"),
            Self::Error => f.write_str("ERROR"),
            Self::Unknown(value) => f.write_str(value),
        }
    }
}

/// One observed job status plus any messages UniProt attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatusReport {
    pub status: JobStatus,
    pub messages: Vec<String>,
}

impl JobStatusReport {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            messages: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusResponse {
    pub job_status: Option<String>,
    /// Present instead of `jobStatus` once UniProt inlines a finished job's results
    pub results: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<UpstreamMessage>,
    #[serde(default)]
    pub warnings: Vec<UpstreamMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamMessage {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResultsPage {
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub failed_ids: Vec<String>,
}

/// One raw row of mapping output
#[derive(Debug, Clone, Deserialize)]
pub struct MappingResultItem {
    pub from: String,
    pub to: UniProtEntry,
}

/// The subset of a UniProtKB entry we read
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniProtEntry {
    #[serde(rename = "uniProtkbId")]
    pub uniprot_id: String,
    pub primary_accession: String,
    pub comments: Vec<EntryComment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryComment {
    pub comment_type: String,
    /// Many comment types (INTERACTION, SUBCELLULAR LOCATION, ...) carry no texts
    pub texts: Option<Vec<CommentText>>,
}

impl EntryComment {
    pub fn is_function(&self) -> bool {
        self.comment_type == FUNCTION_COMMENT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentText {
    pub value: String,
}

/// Caller-facing summary of one mapped gene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSummary {
    pub gene: String,
    pub uniprot_id: String,
    pub uniprot_accession: String,
    pub comment_text: String,
}
