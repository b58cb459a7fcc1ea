//! Shared validation utilities
//!
//! Inbound fields are checked here before anything is sent to UniProt.
//!
//! # Examples
//!
//! ```rust
//! use genefunc_server::features::shared::validation::{parse_tax_id, validate_gene_list};
//! use serde_json::json;
//!
//! let genes = vec!["TP53".to_string(), "BRCA1".to_string()];
//! assert!(validate_gene_list(&genes).is_ok());
//!
//! assert_eq!(parse_tax_id(&json!("9606")).unwrap().get(), 9606);
//! assert_eq!(parse_tax_id(&json!(10090)).unwrap().get(), 10090);
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::idmapping::TaxId;

/// UniProt rejects ID mapping jobs with more identifiers than this.
pub const MAX_GENES: usize = 100_000;

/// Errors that can occur during gene list validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneListValidationError {
    #[error("geneList must contain at least one gene")]
    Empty,

    #[error("geneList has {actual} genes; at most {max} are allowed")]
    TooMany { max: usize, actual: usize },

    #[error("geneList[{index}] is blank")]
    BlankGene { index: usize },

    #[error("geneList[{index}] ('{gene}') must not contain ','")]
    ContainsSeparator { index: usize, gene: String },
}

/// Errors that can occur during taxonomy id validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxIdValidationError {
    #[error("taxId is required")]
    Required,

    #[error("taxId must be a positive integer, got {0}")]
    Invalid(String),
}

/// Validate a gene list
///
/// # Rules
/// - Must not be empty or exceed [`MAX_GENES`] entries
/// - Every gene must be non-blank
/// - No gene may contain `,`, which separates ids on the wire
///
/// Duplicates and order are left alone.
pub fn validate_gene_list(genes: &[String]) -> Result<(), GeneListValidationError> {
    if genes.is_empty() {
        return Err(GeneListValidationError::Empty);
    }

    if genes.len() > MAX_GENES {
        return Err(GeneListValidationError::TooMany {
            max: MAX_GENES,
            actual: genes.len(),
        });
    }

    for (index, gene) in genes.iter().enumerate() {
        if gene.trim().is_empty() {
            return Err(GeneListValidationError::BlankGene { index });
        }

        if gene.contains(',') {
            return Err(GeneListValidationError::ContainsSeparator {
                index,
                gene: gene.clone(),
            });
        }
    }

    Ok(())
}

/// Parse a taxonomy id given either as a JSON number or a decimal string
pub fn parse_tax_id(value: &Value) -> Result<TaxId, TaxIdValidationError> {
    let parsed = match value {
        Value::Null => return Err(TaxIdValidationError::Required),
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .and_then(TaxId::new)
        .ok_or_else(|| TaxIdValidationError::Invalid(value.to_string()))
}
