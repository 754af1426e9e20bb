//! Passage result model.
//!
//! The serialized shape (camelCase field names) is the wire format consumers
//! of the passage lookup service receive.

use serde::{Deserialize, Serialize};

/// One contiguous run of verse text, partitioned at highlight boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    /// True when the run sits inside a speech-highlight span.
    pub highlighted: bool,
    /// True when the owning element opens its paragraph. Highlighted runs
    /// never carry structural flags.
    pub paragraph_start: bool,
    /// True when the owning paragraph uses poetry layout.
    pub poetry: bool,
}

/// One reconstructed verse.
///
/// Concatenating `blocks` in order (ignoring `highlighted`) yields `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRecord {
    pub chapter_number: Option<u32>,
    pub verse_number: u32,
    /// Raw verse-marker text; may be non-numeric in study editions.
    pub verse_label: String,
    /// `"{chapter}:{verse} {book}"` built from the page reference label.
    pub full_reference: String,
    /// Heading immediately preceding the verse's paragraph, attached only at
    /// verse start.
    pub heading: Option<String>,
    pub paragraph_start: bool,
    pub text: String,
    pub blocks: Vec<TextBlock>,
}

/// Final result of a passage lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassageResult {
    /// Display reference as rendered on the page, e.g. "John 3:16".
    pub reference: String,
    pub verses: Vec<VerseRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_fields() {
        let record = VerseRecord {
            chapter_number: Some(3),
            verse_number: 16,
            verse_label: "16".into(),
            full_reference: "3:16 John ".into(),
            heading: None,
            paragraph_start: true,
            text: "For God so loved the world".into(),
            blocks: vec![TextBlock {
                text: "For God so loved the world".into(),
                highlighted: false,
                paragraph_start: true,
                poetry: false,
            }],
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["chapterNumber"], 3);
        assert_eq!(value["verseNumber"], 16);
        assert_eq!(value["fullReference"], "3:16 John ");
        assert_eq!(value["paragraphStart"], true);
        assert_eq!(value["blocks"][0]["highlighted"], false);
    }
}
