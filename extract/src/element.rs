//! Inline element selection
//!
//! Queries the parsed page for the text-bearing inline elements (`p > span`)
//! in document order and materializes each one as owned data, so the
//! downstream stages never touch the parsed tree. Marker nodes are captured
//! as parts interleaved with the text runs; residual text is later recovered
//! by subtraction instead of destructive tree edits.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static TEXT_SPAN_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("p > span").unwrap());
static REFERENCE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(".bcv").unwrap());

/// Marker classes that never contribute to verse text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Chapter,
    Verse,
    CrossReference,
    Footnote,
}

/// One marker node nested inside a text element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    /// The marker's rendered text, e.g. `"16 "` for a verse number.
    pub text: String,
}

/// Document-ordered interleaving of text runs and marker nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlinePart {
    Text(String),
    Marker(Marker),
}

/// One speech-highlight span nested inside a text element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    /// The span's inner markup, exactly as serialized.
    pub raw: String,
    /// The span's rendered text with marker-class descendants removed.
    pub rendered: String,
}

/// One text-bearing inline element, materialized with its structural context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineElement {
    pub parts: Vec<InlinePart>,
    pub highlights: Vec<HighlightSpan>,
    /// The element is the first text-bearing child of its paragraph.
    pub paragraph_start: bool,
    /// The paragraph sits inside a poetry container.
    pub poetry: bool,
    /// Text of the heading immediately preceding the paragraph, if any.
    pub heading: Option<String>,
}

/// Text of the page's display-reference element, e.g. "John 3:16".
pub fn reference_label(document: &Html) -> Option<String> {
    let label: String = document.select(&REFERENCE_SEL).next()?.text().collect();
    let label = label.trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// All text-bearing inline elements, in document order.
pub fn select_elements(document: &Html) -> Vec<InlineElement> {
    let mut elements = Vec::new();
    for span in document.select(&TEXT_SPAN_SEL) {
        let mut parts = Vec::new();
        let mut highlights = Vec::new();
        collect_parts(span, &mut parts, &mut highlights);
        elements.push(InlineElement {
            parts,
            highlights,
            paragraph_start: is_paragraph_start(&span),
            poetry: in_poetry(&span),
            heading: preceding_heading(&span),
        });
    }
    debug!(elements = elements.len(), "selected inline text elements");
    elements
}

fn collect_parts(element: ElementRef<'_>, parts: &mut Vec<InlinePart>, highlights: &mut Vec<HighlightSpan>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            push_text(parts, text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if let Some(kind) = marker_kind(&child_el) {
                // Markers are captured whole; their subtree never reaches the
                // residual text.
                parts.push(InlinePart::Marker(Marker {
                    kind,
                    text: child_el.text().collect(),
                }));
            } else {
                if has_class(&child_el, "woj") {
                    highlights.push(HighlightSpan {
                        raw: child_el.inner_html(),
                        rendered: rendered_text(child_el),
                    });
                }
                collect_parts(child_el, parts, highlights);
            }
        }
    }
}

/// Rendered text of a subtree, skipping marker-class descendants.
fn rendered_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_rendered(element, &mut out);
    out
}

fn collect_rendered(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if marker_kind(&child_el).is_none() {
                collect_rendered(child_el, out);
            }
        }
    }
}

fn push_text(parts: &mut Vec<InlinePart>, text: &str) {
    if let Some(InlinePart::Text(run)) = parts.last_mut() {
        run.push_str(text);
    } else {
        parts.push(InlinePart::Text(text.to_string()));
    }
}

fn marker_kind(element: &ElementRef<'_>) -> Option<MarkerKind> {
    for class in element.value().classes() {
        let kind = match class {
            "chapternum" => MarkerKind::Chapter,
            "versenum" => MarkerKind::Verse,
            "crossreference" => MarkerKind::CrossReference,
            "footnote" => MarkerKind::Footnote,
            _ => continue,
        };
        return Some(kind);
    }
    None
}

fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn is_paragraph_start(span: &ElementRef<'_>) -> bool {
    let Some(paragraph) = span.parent().and_then(ElementRef::wrap) else {
        return false;
    };
    paragraph
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")
        .is_some_and(|first| first.id() == span.id())
}

fn in_poetry(span: &ElementRef<'_>) -> bool {
    span.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| has_class(&el, "poetry"))
}

/// Heading text when the paragraph's nearest preceding element sibling is a
/// heading node. Whitespace-only text siblings are skipped.
fn preceding_heading(span: &ElementRef<'_>) -> Option<String> {
    let paragraph = span.parent()?;
    let mut sibling = paragraph.prev_sibling();
    while let Some(node) = sibling {
        if let Some(el) = ElementRef::wrap(node) {
            if !matches!(el.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
                return None;
            }
            let text: String = el.text().collect();
            let text = text.trim();
            return if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            };
        }
        if let Some(text) = node.value().as_text() {
            if !text.trim().is_empty() {
                return None;
            }
        }
        sibling = node.prev_sibling();
    }
    None
}
