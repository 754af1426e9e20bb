//! Marker scanning
//!
//! Folds one element's parts into its residual text plus chapter/verse
//! counters. Marker removal happens here, before highlight splitting, so
//! marker text never leaks into a text block.

use crate::element::{InlineElement, InlinePart, MarkerKind};

/// Result of scanning one element's markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerScan {
    /// Element text with every marker contribution removed.
    pub residual: String,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
    /// Raw verse-marker text, kept verbatim for non-numeric labels.
    pub verse_label: Option<String>,
}

/// Scan an element's parts in document order.
///
/// A chapter marker resets the verse counter to 1; a verse marker in the same
/// element overrides that reset.
pub fn scan_markers(element: &InlineElement) -> MarkerScan {
    let mut scan = MarkerScan::default();
    for part in &element.parts {
        match part {
            InlinePart::Text(run) => scan.residual.push_str(run),
            InlinePart::Marker(marker) => match marker.kind {
                MarkerKind::Chapter => {
                    scan.chapter = leading_number(&marker.text);
                    scan.verse = Some(1);
                }
                MarkerKind::Verse => {
                    if let Some(number) = leading_number(&marker.text) {
                        scan.verse = Some(number);
                    }
                    scan.verse_label = Some(marker.text.trim().to_string());
                }
                MarkerKind::CrossReference | MarkerKind::Footnote => {}
            },
        }
    }
    scan
}

fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
