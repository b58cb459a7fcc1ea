//! Gene function queries

pub mod summarize;

pub use summarize::{SummarizeGeneFunctionsError, SummarizeGeneFunctionsQuery};
