//! Gene function summaries backed by UniProt ID mapping

pub mod queries;
pub mod routes;

pub use queries::{SummarizeGeneFunctionsError, SummarizeGeneFunctionsQuery};
pub use routes::{gene_functions_routes, summarize_gene_functions};
