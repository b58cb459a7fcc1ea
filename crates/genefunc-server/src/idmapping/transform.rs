//! Condense raw mapping results into [`CommentSummary`] records.
//!
//! `commentText` is built from the entry's FUNCTION comments only: each one
//! contributes its text values joined by `\n` plus a trailing `\n`, blocks are
//! joined by `\n`, and `\n\n` is appended to the whole. An entry without
//! FUNCTION comments therefore yields exactly `"\n\n"`.

use serde::Deserialize;
use serde_json::Value;

use super::error::{IdMappingError, Result};
use super::models::{CommentSummary, EntryComment, MappingResultItem};

/// Summarize every raw result item, preserving UniProt's order.
pub fn summarize(raw: &[Value]) -> Result<Vec<CommentSummary>> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            let item = MappingResultItem::deserialize(value).map_err(|e| {
                IdMappingError::Transform {
                    index,
                    reason: e.to_string(),
                }
            })?;
            summarize_item(item)
                .map_err(|reason| IdMappingError::Transform { index, reason })
        })
        .collect()
}

fn summarize_item(item: MappingResultItem) -> std::result::Result<CommentSummary, String> {
    let comment_text = function_text(&item.to.comments)?;

    Ok(CommentSummary {
        gene: item.from,
        uniprot_id: item.to.uniprot_id,
        uniprot_accession: item.to.primary_accession,
        comment_text,
    })
}

fn function_text(comments: &[EntryComment]) -> std::result::Result<String, String> {
    let mut blocks = Vec::new();

    for comment in comments.iter().filter(|c| c.is_function()) {
        let texts = comment
            .texts
            .as_ref()
            .ok_or_else(|| "FUNCTION comment without texts".to_string())?;

        let mut block = texts
            .iter()
            .map(|text| text.value.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        block.push('\n');
        blocks.push(block);
    }

    let mut text = blocks.join("\n");
    text.push_str("\n\n");
    Ok(text)
}
