//! GeneFunc Server Library
//!
//! HTTP relay that summarizes the function of genes using UniProt.
//!
//! # Overview
//!
//! A caller posts a list of gene names and a taxonomy id. The server maps the
//! genes to reviewed UniProtKB entries through UniProt's asynchronous ID
//! mapping service and answers with one summary per mapped entry, holding the
//! text of its FUNCTION comments.
//!
//! - **API Endpoints**: `POST /api/v1`, `POST /api/v1/gene-functions`,
//!   `GET /api/v1/health`
//! - **ID Mapping**: submit, poll, fetch and transform ([`idmapping`])
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS and request logging
//!
//! # Architecture
//!
//! Features are vertical slices under [`features`]: each owns its queries and
//! routes. Upstream access goes through the [`idmapping::IdMappingApi`] trait,
//! so handlers can be exercised against a scripted implementation.
//!
//! ## Framework Stack
//!
//! - **Axum**: Modern, ergonomic web framework
//! - **Reqwest**: HTTP client for UniProt
//! - **Tower**: Middleware and service abstractions
//!
//! # Example
//!
//! ```no_run
//! use genefunc_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod idmapping;
pub mod middleware;

// Re-export commonly used types
pub use error::AppError;
