//! UniProt ID mapping
//!
//! Client and workflow for UniProt's asynchronous ID mapping service
//! (`https://rest.uniprot.org/idmapping`). A mapping runs in four sequential
//! stages:
//!
//! 1. **Submit**: POST the gene list and taxonomy id, receive a job id
//! 2. **Poll**: query the job status until it is terminal ([`poller`])
//! 3. **Fetch**: stream the JSON results of the finished job
//! 4. **Transform**: condense each result into a [`CommentSummary`] ([`transform`])
//!
//! [`pipeline::run_mapping`] drives all four against any [`IdMappingApi`].
//!
//! # Example
//!
//! ```no_run
//! use genefunc_server::idmapping::{
//!     pipeline::run_mapping, IdMappingClient, MappingRequest, TaxId, UniProtConfig,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = UniProtConfig::default();
//! let client = IdMappingClient::new(config.clone())?;
//! let request = MappingRequest::new(vec!["TP53".to_string()], TaxId::HUMAN);
//!
//! for summary in run_mapping(&client, &request, &config.poll).await? {
//!     println!("{} -> {}", summary.gene, summary.uniprot_accession);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod poller;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{IdMappingApi, IdMappingClient};
pub use config::UniProtConfig;
pub use error::{IdMappingError, Result};
pub use models::{CommentSummary, JobHandle, JobStatus, JobStatusReport, MappingRequest, TaxId};
pub use poller::{Backoff, PollPolicy};
