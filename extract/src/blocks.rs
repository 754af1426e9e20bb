//! Highlight splitting
//!
//! Partitions an element's residual text into ordered blocks at highlight
//! boundaries. Pure with respect to the parsed tree: the input is a string
//! plus the materialized highlight spans.
//!
//! The splitter only ever searches the current trailing block, so text
//! consumed by an earlier span is never re-matched. The highlighted segment
//! is the exact substring that matched, which makes block concatenation
//! reproduce the consolidated residual by construction.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use versegate_core::{TextBlock, VerseGateError};

use crate::element::HighlightSpan;

static MULTI_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Collapse runs of two or more whitespace characters to a single space.
pub(crate) fn consolidate_ws(text: &str) -> String {
    MULTI_WS_RE.replace_all(text, " ").into_owned()
}

/// Split residual text into blocks at highlight-span boundaries.
///
/// Structural flags are copied onto non-highlighted blocks; highlighted
/// blocks never carry them.
pub fn split_blocks(
    residual: &str,
    highlights: &[HighlightSpan],
    paragraph_start: bool,
    poetry: bool,
) -> Result<Vec<TextBlock>, VerseGateError> {
    let plain = |text: String| TextBlock {
        text,
        highlighted: false,
        paragraph_start,
        poetry,
    };

    let mut blocks = vec![plain(consolidate_ws(residual))];
    let mut trailing = Some(0usize);

    for span in highlights {
        if span.raw.is_empty() && span.rendered.trim().is_empty() {
            continue;
        }
        let index = trailing.ok_or_else(|| ambiguity(span))?;
        let tail = blocks[index].text.clone();
        let (start, matched_len) = locate(&tail, span).ok_or_else(|| ambiguity(span))?;

        let before = &tail[..start];
        let matched = &tail[start..start + matched_len];
        let after = &tail[start + matched_len..];

        if before.is_empty() {
            blocks.remove(index);
        } else {
            blocks[index].text = before.to_string();
        }
        blocks.push(TextBlock {
            text: matched.to_string(),
            highlighted: true,
            paragraph_start: false,
            poetry: false,
        });
        if after.is_empty() {
            trailing = None;
        } else {
            blocks.push(plain(after.to_string()));
            trailing = Some(blocks.len() - 1);
        }
    }

    Ok(blocks)
}

/// Find the span in the trailing text: first by its raw inner markup, then by
/// its consolidated rendered text when the markup itself does not occur
/// (nested tags, entity encoding).
fn locate(tail: &str, span: &HighlightSpan) -> Option<(usize, usize)> {
    if !span.raw.is_empty() {
        if let Some(start) = tail.find(&span.raw) {
            return Some((start, span.raw.len()));
        }
    }
    let rendered = consolidate_ws(&span.rendered);
    if rendered.is_empty() {
        return None;
    }
    tail.find(&rendered).map(|start| {
        warn!(needle = %span.raw, "highlight markup not found verbatim, matched rendered text");
        (start, rendered.len())
    })
}

fn ambiguity(span: &HighlightSpan) -> VerseGateError {
    VerseGateError::ParseAmbiguity {
        needle: span.raw.clone(),
    }
}
