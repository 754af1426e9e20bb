//! Verse assembly
//!
//! Folds the ordered element stream into verse records. The per-element
//! decision is a pure step function over `(state, element)`, so the
//! continuation rule tests without any document plumbing.

use tracing::debug;
use versegate_core::{TextBlock, VerseGateError, VerseRecord};

use crate::blocks::split_blocks;
use crate::element::InlineElement;
use crate::markers::scan_markers;

/// Counters carried across the element stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblerState {
    pub chapter: Option<u32>,
    /// Verse number of the most recently started record; 0 before any.
    pub verse: u32,
}

/// What one element contributes to the verse list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseAction {
    Start(VerseRecord),
    Continue { blocks: Vec<TextBlock>, text: String },
}

/// Decide whether one element starts a new verse or continues the previous.
///
/// An element continues the previous verse when it carries no verse number of
/// its own (or repeats the current one) and at least one record exists.
pub fn step(
    state: &AssemblerState,
    element: &InlineElement,
    reference: &str,
    has_records: bool,
) -> Result<(AssemblerState, VerseAction), VerseGateError> {
    let scan = scan_markers(element);
    let blocks = split_blocks(
        &scan.residual,
        &element.highlights,
        element.paragraph_start,
        element.poetry,
    )?;
    let text: String = blocks.iter().map(|block| block.text.as_str()).collect();

    let mut next = state.clone();
    if scan.chapter.is_some() {
        next.chapter = scan.chapter;
    }

    let verse_changed = matches!(scan.verse, Some(n) if n > 0 && n != state.verse);
    if !verse_changed && has_records {
        return Ok((next, VerseAction::Continue { blocks, text }));
    }

    let verse_number = scan.verse.unwrap_or(state.verse);
    next.verse = verse_number;

    let verse_label = match scan.verse_label {
        Some(label) => label,
        None if verse_number > 0 => verse_number.to_string(),
        None => String::new(),
    };

    let record = VerseRecord {
        chapter_number: next.chapter,
        verse_number,
        verse_label,
        full_reference: full_reference(next.chapter, verse_number, reference),
        heading: element.heading.clone(),
        paragraph_start: element.paragraph_start,
        text,
        blocks,
    };
    Ok((next, VerseAction::Start(record)))
}

/// Fold the element stream into the ordered verse list.
pub fn assemble(
    elements: &[InlineElement],
    reference: &str,
) -> Result<Vec<VerseRecord>, VerseGateError> {
    let mut state = AssemblerState::default();
    let mut verses: Vec<VerseRecord> = Vec::new();

    for element in elements {
        let (next, action) = step(&state, element, reference, !verses.is_empty())?;
        state = next;
        match action {
            VerseAction::Start(record) => verses.push(record),
            VerseAction::Continue { mut blocks, text } => {
                if let Some(last) = verses.last_mut() {
                    last.blocks.append(&mut blocks);
                    last.text.push_str(&text);
                }
            }
        }
    }

    debug!(verses = verses.len(), "assembled verse records");
    Ok(verses)
}

/// `"{chapter}:{verse} {book}"`, with the digits and colon stripped from the
/// page reference label. Chapterless documents omit the chapter part.
fn full_reference(chapter: Option<u32>, verse: u32, reference: &str) -> String {
    let book: String = reference
        .chars()
        .filter(|c| !c.is_ascii_digit() && *c != ':')
        .collect();
    match chapter {
        Some(chapter) => format!("{chapter}:{verse} {book}"),
        None => format!("{verse} {book}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{InlinePart, Marker, MarkerKind};

    fn text(run: &str) -> InlinePart {
        InlinePart::Text(run.into())
    }

    fn marker(kind: MarkerKind, text: &str) -> InlinePart {
        InlinePart::Marker(Marker { kind, text: text.into() })
    }

    fn element(parts: Vec<InlinePart>) -> InlineElement {
        InlineElement {
            parts,
            highlights: vec![],
            paragraph_start: false,
            poetry: false,
            heading: None,
        }
    }

    #[test]
    fn single_element_builds_one_record() {
        let elements = vec![element(vec![
            marker(MarkerKind::Chapter, "3 "),
            marker(MarkerKind::Verse, "16 "),
            text("For God so loved the world"),
        ])];
        let verses = assemble(&elements, "John 3:16").unwrap();
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].verse_number, 16);
        assert_eq!(verses[0].chapter_number, Some(3));
        assert_eq!(verses[0].full_reference, "3:16 John ");
        assert_eq!(verses[0].text, "For God so loved the world");
    }

    #[test]
    fn unmarked_element_continues_previous_verse() {
        let elements = vec![
            element(vec![
                marker(MarkerKind::Verse, "16 "),
                text("For God so loved the world,"),
            ]),
            element(vec![text(" that he gave his only Son")]),
        ];
        let verses = assemble(&elements, "John 3:16").unwrap();
        assert_eq!(verses.len(), 1);
        assert_eq!(
            verses[0].text,
            "For God so loved the world, that he gave his only Son"
        );
        assert_eq!(verses[0].blocks.len(), 2);
    }

    #[test]
    fn repeated_verse_number_continues_previous_verse() {
        let elements = vec![
            element(vec![marker(MarkerKind::Verse, "5 "), text("first part")]),
            element(vec![marker(MarkerKind::Verse, "5 "), text(" second part")]),
        ];
        let verses = assemble(&elements, "Psalm 23").unwrap();
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].text, "first part second part");
    }

    #[test]
    fn chapter_marker_resets_verse_counter() {
        let elements = vec![
            element(vec![marker(MarkerKind::Chapter, "1 "), text("chapter one opens")]),
            element(vec![marker(MarkerKind::Verse, "2 "), text("verse two")]),
            element(vec![marker(MarkerKind::Chapter, "2 "), text("chapter two opens")]),
        ];
        let verses = assemble(&elements, "Psalm 1-2").unwrap();
        assert_eq!(verses.len(), 3);
        assert_eq!(
            verses.iter().map(|v| v.verse_number).collect::<Vec<_>>(),
            vec![1, 2, 1]
        );
        assert_eq!(verses[2].chapter_number, Some(2));
        assert_eq!(verses[2].full_reference, "2:1 Psalm -");
    }

    #[test]
    fn verse_numbers_non_decreasing_within_chapter() {
        let elements = vec![
            element(vec![marker(MarkerKind::Chapter, "3 "), text("v1")]),
            element(vec![text(" wrap")]),
            element(vec![marker(MarkerKind::Verse, "2 "), text("v2")]),
            element(vec![marker(MarkerKind::Verse, "3 "), text("v3")]),
        ];
        let verses = assemble(&elements, "John 3").unwrap();
        let numbers: Vec<u32> = verses.iter().map(|v| v.verse_number).collect();
        assert!(numbers.windows(2).all(|w| w[0] <= w[1]), "{numbers:?}");
    }

    #[test]
    fn heading_attaches_only_at_verse_start() {
        let mut opener = element(vec![marker(MarkerKind::Verse, "1 "), text("verse one")]);
        opener.heading = Some("The Word Became Flesh".into());
        let mut continuation = element(vec![text(" continued line")]);
        continuation.heading = Some("A Stray Heading".into());

        let verses = assemble(&[opener, continuation], "John 1").unwrap();
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].heading.as_deref(), Some("The Word Became Flesh"));
    }

    #[test]
    fn blocks_concatenation_equals_text() {
        let mut first = element(vec![
            marker(MarkerKind::Verse, "9 "),
            text(r#"Jesus said, "Follow me." and more"#),
        ]);
        first.highlights = vec![crate::element::HighlightSpan {
            raw: r#""Follow me.""#.into(),
            rendered: r#""Follow me.""#.into(),
        }];
        let second = element(vec![text(" a trailing line")]);

        let verses = assemble(&[first, second], "Matthew 9").unwrap();
        for verse in &verses {
            let joined: String = verse.blocks.iter().map(|b| b.text.as_str()).collect();
            assert_eq!(joined, verse.text);
        }
    }

    #[test]
    fn paragraph_start_copied_from_opening_element() {
        let mut opener = element(vec![marker(MarkerKind::Verse, "1 "), text("verse")]);
        opener.paragraph_start = true;
        let verses = assemble(&[opener], "John 1").unwrap();
        assert!(verses[0].paragraph_start);
    }

    #[test]
    fn empty_stream_builds_no_records() {
        let verses = assemble(&[], "John 3:16").unwrap();
        assert!(verses.is_empty());
    }
}
