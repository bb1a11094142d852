use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::extractor::{element_text, normalize_whitespace};

/// Tags search engines weight as content-bearing.
static SEMANTIC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("main, article, section, p, h1, h2, h3, h4, h5, h6, li")
        .expect("semantic selector should be valid")
});

/// Inline-style fragments that mark an element as not rendered.
pub(crate) const HIDDEN_STYLE_MARKERS: [&str; 4] = [
    "display:none",
    "display: none",
    "visibility:hidden",
    "visibility: hidden",
];

/// Minimum trimmed length for a chunk to count as content rather than
/// nav/button noise.
const SEMANTIC_MIN_CHARS: usize = 20;

/// Checks the element's own attributes for hidden markers. Ancestors are
/// deliberately not consulted; every element is judged on its opening tag
/// alone, matching the per-span classification rules.
pub(crate) fn is_marked_hidden(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if let Some(style) = value.attr("style")
        && HIDDEN_STYLE_MARKERS.iter().any(|m| style.contains(m))
    {
        return true;
    }
    value.attr("aria-hidden").is_some_and(|v| v == "true")
}

/// Measures how much text lives inside semantically meaningful tags,
/// excluding elements hidden via style or ARIA.
///
/// Nested semantic elements each contribute their full subtree text, so the
/// measure can exceed the plain text length; downstream ratios clamp. Only
/// the length survives; the concatenated text itself is discarded.
pub fn semantic_text_length(html: &str) -> usize {
    let document = Html::parse_document(html);
    semantic_text_length_in(&document)
}

/// Same as [`semantic_text_length`] against an already parsed document.
pub(crate) fn semantic_text_length_in(document: &Html) -> usize {
    let mut chunks: Vec<String> = Vec::new();
    for element in document.select(&SEMANTIC_SELECTOR) {
        if is_marked_hidden(element) {
            continue;
        }
        let chunk = normalize_whitespace(&element_text(element));
        if chunk.chars().count() > SEMANTIC_MIN_CHARS {
            chunks.push(chunk);
        }
    }
    chunks.join(" ").chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_text_in_semantic_tags() {
        let html = "<p>This paragraph is long enough to be counted as content.</p>";
        let expected = "This paragraph is long enough to be counted as content.".len();
        assert_eq!(semantic_text_length(html), expected);
    }

    #[test]
    fn ignores_short_chunks() {
        // Nav links and buttons rarely clear 20 characters.
        assert_eq!(semantic_text_length("<li>Home</li><li>About us</li>"), 0);
    }

    #[test]
    fn hidden_paragraph_contributes_nothing() {
        let html = r#"<p style="display:none">text over twenty chars long here</p>"#;
        assert_eq!(semantic_text_length(html), 0);
    }

    #[test]
    fn spaced_and_visibility_markers_also_hide() {
        let spaced = r#"<p style="display: none">text over twenty chars long here</p>"#;
        let visibility = r#"<p style="visibility:hidden">text over twenty chars long here</p>"#;
        let aria = r#"<p aria-hidden="true">text over twenty chars long here</p>"#;
        assert_eq!(semantic_text_length(spaced), 0);
        assert_eq!(semantic_text_length(visibility), 0);
        assert_eq!(semantic_text_length(aria), 0);
    }

    #[test]
    fn non_semantic_containers_are_not_counted() {
        let html = "<div>plain div copy that is certainly long enough to pass the filter</div>";
        assert_eq!(semantic_text_length(html), 0);
    }

    #[test]
    fn nested_semantic_elements_each_contribute() {
        let html =
            "<section><p>This nested paragraph easily clears the length filter.</p></section>";
        let inner = "This nested paragraph easily clears the length filter.".len();
        // The section span and the paragraph span both report the text,
        // joined by a single space.
        assert_eq!(semantic_text_length(html), inner * 2 + 1);
    }

    #[test]
    fn nested_same_named_sections_attribute_text_correctly() {
        // A nested <section> must not truncate the outer span early.
        let html = "<section><section>Inner section body text, long enough to count.</section>\
                    <p>Outer trailing paragraph, also long enough to count.</p></section>";
        let inner = "Inner section body text, long enough to count.".len();
        let trailing = "Outer trailing paragraph, also long enough to count.".len();
        // outer section (inner + trailing + joining space), inner section, p
        let expected = (inner + 1 + trailing) + 1 + inner + 1 + trailing;
        assert_eq!(semantic_text_length(html), expected);
    }
}
