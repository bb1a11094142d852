use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

/// Minimum trimmed length for a sentence segment to count as a paragraph.
const PARAGRAPH_MIN_CHARS: usize = 20;
/// Preview length for the normalized text, in characters.
const PREVIEW_CHARS: usize = 200;

/// Elements whose text never reaches a reader and is excluded everywhere.
const NON_CONTENT_TAGS: [&str; 3] = ["script", "style", "noscript"];

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern should be valid"));

/// Plain-text measurements of a single HTML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextProfile {
    pub text_length: usize,
    pub paragraph_count: usize,
    pub preview_text: String,
    pub full_text: String,
}

/// Extracts the normalized plain text of an HTML document.
///
/// Script, style and noscript subtrees and comments contribute nothing;
/// every remaining text node is joined with spaces and runs of whitespace
/// collapse to a single space. Degenerate input yields an all-zero profile.
pub fn extract_text(html: &str) -> TextProfile {
    let document = Html::parse_document(html);
    extract_text_in(&document)
}

/// Same as [`extract_text`] against an already parsed document.
pub(crate) fn extract_text_in(document: &Html) -> TextProfile {
    let full_text = normalize_whitespace(&element_text(document.root_element()));
    let text_length = full_text.chars().count();
    let paragraph_count = count_paragraphs(&full_text);
    let preview_text = truncate_chars(&full_text, PREVIEW_CHARS);

    TextProfile {
        text_length,
        paragraph_count,
        preview_text,
        full_text,
    }
}

/// Concatenates the text nodes under `root`, skipping non-content subtrees.
/// Raw output; callers normalize whitespace afterwards.
pub(crate) fn element_text(root: ElementRef<'_>) -> String {
    let mut buf = String::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let mut excluded = false;
        for ancestor in node.ancestors() {
            if ancestor.id() == root.id() {
                break;
            }
            if let Some(element) = ancestor.value().as_element()
                && NON_CONTENT_TAGS.contains(&element.name())
            {
                excluded = true;
                break;
            }
        }
        if !excluded {
            buf.push_str(text);
            buf.push(' ');
        }
    }
    buf
}

/// Collapses runs of whitespace to single spaces and trims. Idempotent on
/// its own output.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character-boundary-safe prefix truncation (may cut mid-word).
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Sentence-boundary heuristic, not real segmentation: split on `.`/`!`/`?`
/// followed by whitespace and count the substantial segments.
fn count_paragraphs(text: &str) -> usize {
    SENTENCE_BOUNDARY
        .split(text)
        .filter(|segment| segment.trim().chars().count() > PARAGRAPH_MIN_CHARS)
        .count()
}
