//! Gene function routes

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use super::queries::{summarize::handle as handle_summarize, SummarizeGeneFunctionsQuery};
use crate::error::AppError;
use crate::features::FeatureState;
use crate::idmapping::CommentSummary;

/// Create gene function routes
pub fn gene_functions_routes() -> Router<FeatureState> {
    Router::new().route("/gene-functions", post(summarize_gene_functions))
}

/// Summarize the FUNCTION comments of each gene
///
/// POST /api/v1
/// POST /api/v1/gene-functions
///
/// Body: `{"geneList": ["TP53", "BRCA1"], "taxId": 9606}`
pub async fn summarize_gene_functions(
    State(state): State<FeatureState>,
    body: Bytes,
) -> Result<Json<Vec<CommentSummary>>, AppError> {
    let query = SummarizeGeneFunctionsQuery::from_json(&body)?;
    let summaries = handle_summarize(state.api.as_ref(), &state.poll_policy, query).await?;

    Ok(Json(summaries))
}
