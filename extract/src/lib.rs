//! `versegate-extract` — markup segmentation and verse reconstruction.
//!
//! Turns a fetched passage page into an ordered list of verse records. The
//! pipeline is: select inline elements → scan markers → split highlight
//! blocks → fold into verses. Every stage after selection operates on owned
//! data, never on the parsed tree.

pub mod assembler;
pub mod blocks;
pub mod element;
pub mod markers;

pub use assembler::{assemble, step, AssemblerState, VerseAction};
pub use blocks::split_blocks;
pub use element::{
    reference_label, select_elements, HighlightSpan, InlineElement, InlinePart, Marker,
    MarkerKind,
};
pub use markers::{scan_markers, MarkerScan};

use scraper::Html;
use tracing::debug;
use versegate_core::{PassageResult, VerseGateError};

/// Extract a passage result from a fetched page.
///
/// Fails with [`VerseGateError::NotFound`] when the page carries no display
/// reference or yields zero verses; there is no partial result.
pub fn extract_passage(
    html: &str,
    query: &str,
    version: &str,
) -> Result<PassageResult, VerseGateError> {
    let document = Html::parse_document(html);

    let reference = element::reference_label(&document).ok_or_else(|| not_found(query, version))?;
    let elements = element::select_elements(&document);
    let verses = assembler::assemble(&elements, &reference)?;
    if verses.is_empty() {
        return Err(not_found(query, version));
    }

    debug!(reference = %reference, verses = verses.len(), "extracted passage");
    Ok(PassageResult { reference, verses })
}

fn not_found(query: &str, version: &str) -> VerseGateError {
    VerseGateError::NotFound {
        query: query.to_string(),
        version: version.to_string(),
    }
}
