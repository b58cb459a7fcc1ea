//! Summarize gene functions query
//!
//! Maps a list of gene names to reviewed UniProtKB entries and returns the
//! FUNCTION annotations of each entry.
//!
//! # Architecture
//!
//! - Query: the inbound JSON body, validated into a [`MappingRequest`]
//! - Handler: standalone async function running the ID mapping pipeline

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::features::shared::validation::{
    parse_tax_id, validate_gene_list, GeneListValidationError, TaxIdValidationError,
};
use crate::idmapping::{
    pipeline::run_mapping, CommentSummary, IdMappingApi, IdMappingError, MappingRequest,
    PollPolicy,
};

/// Query to summarize the functions of a list of genes
///
/// # Examples
///
/// ```rust
/// use genefunc_server::features::gene_functions::queries::SummarizeGeneFunctionsQuery;
///
/// let query = SummarizeGeneFunctionsQuery::from_json(
///     br#"{"geneList": ["TP53", "BRCA1"], "taxId": 9606}"#,
/// )
/// .unwrap();
///
/// let request = query.validate().unwrap();
/// assert_eq!(request.ids(), "TP53,BRCA1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeGeneFunctionsQuery {
    /// Gene names, in caller order
    #[serde(default)]
    pub gene_list: Vec<String>,

    /// NCBI taxonomy id as a number or a numeric string
    #[serde(default)]
    pub tax_id: Value,
}

/// Errors that can occur when summarizing gene functions
#[derive(Debug, thiserror::Error)]
pub enum SummarizeGeneFunctionsError {
    #[error("Request body is not valid JSON for this endpoint: {0}")]
    MalformedBody(String),

    #[error("{0}")]
    GeneList(#[from] GeneListValidationError),

    #[error("{0}")]
    TaxId(#[from] TaxIdValidationError),

    #[error(transparent)]
    Mapping(#[from] IdMappingError),
}

impl SummarizeGeneFunctionsQuery {
    /// Parse the raw request body.
    ///
    /// The body is read as JSON whatever its `Content-Type`.
    pub fn from_json(body: &[u8]) -> Result<Self, SummarizeGeneFunctionsError> {
        serde_json::from_slice(body)
            .map_err(|e| SummarizeGeneFunctionsError::MalformedBody(e.to_string()))
    }

    /// Validates the query and converts it into a mapping request
    ///
    /// # Errors
    ///
    /// - `geneList` must be non-empty, with non-blank genes free of `,`
    /// - `taxId` must be a positive integer
    #[tracing::instrument(skip(self), fields(genes = self.gene_list.len()))]
    pub fn validate(&self) -> Result<MappingRequest, SummarizeGeneFunctionsError> {
        validate_gene_list(&self.gene_list)?;
        let tax_id = parse_tax_id(&self.tax_id)?;

        tracing::debug!("Query validation passed");
        Ok(MappingRequest::new(self.gene_list.clone(), tax_id))
    }
}

/// Handler function for the summarize query
///
/// Validates the query, then runs submit → poll → fetch → transform.
/// Nothing is sent upstream when validation fails.
pub async fn handle(
    api: &dyn IdMappingApi,
    policy: &PollPolicy,
    query: SummarizeGeneFunctionsQuery,
) -> Result<Vec<CommentSummary>, SummarizeGeneFunctionsError> {
    let request = query.validate()?;

    tracing::info!(
        genes = request.gene_list.len(),
        tax_id = %request.tax_id,
        "Summarizing gene functions"
    );

    Ok(run_mapping(api, &request, policy).await?)
}
