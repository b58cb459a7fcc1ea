//! The complete mapping workflow: submit, poll, fetch, transform.

use tracing::info;

use super::client::IdMappingApi;
use super::error::Result;
use super::models::{CommentSummary, MappingRequest};
use super::poller::{wait_for_completion, PollPolicy};
use super::transform::summarize;

/// Run one mapping request end to end.
///
/// Stages run strictly in sequence and the first failure aborts the rest;
/// nothing is retried and no partial result is returned.
#[tracing::instrument(
    skip(api, request, policy),
    fields(genes = request.gene_list.len(), tax_id = %request.tax_id)
)]
pub async fn run_mapping<A>(
    api: &A,
    request: &MappingRequest,
    policy: &PollPolicy,
) -> Result<Vec<CommentSummary>>
where
    A: IdMappingApi + ?Sized,
{
    let job = api.submit_job(request).await?;
    wait_for_completion(api, &job, policy).await?;
    let raw = api.fetch_results(&job).await?;
    let summaries = summarize(&raw)?;

    info!(job_id = %job, summaries = summaries.len(), "Mapping complete");
    Ok(summaries)
}
