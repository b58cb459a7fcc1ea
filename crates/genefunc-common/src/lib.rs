//! GeneFunc Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities for the GeneFunc workspace.
//!
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//! - **Diagnostics**: helpers for opt-in dumps of upstream payloads
//!
//! # Example
//!
//! ```no_run
//! use genefunc_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod diagnostics;
pub mod logging;

pub use logging::{init_logging, LogConfig, LoggingGuard};
