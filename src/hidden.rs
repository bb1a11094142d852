use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::extractor::{element_text, normalize_whitespace, truncate_chars};
use crate::models::{HiddenFinding, HiddenKind};

/// Minimum cleaned length for hidden content to contribute to the length
/// tally. Shorter matches still increment the element count.
const HIDDEN_MIN_CHARS: usize = 10;
/// Findings retained per analysis.
const MAX_FINDINGS: usize = 3;
/// Preview length for a finding, in characters.
const FINDING_PREVIEW_CHARS: usize = 100;

static DISPLAY_NONE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[style*="display:none"], [style*="display: none"]"#)
        .expect("display:none selector should be valid")
});
static VISIBILITY_HIDDEN: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[style*="visibility:hidden"], [style*="visibility: hidden"]"#)
        .expect("visibility:hidden selector should be valid")
});
static ARIA_HIDDEN: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[aria-hidden="true"]"#).expect("aria-hidden selector should be valid")
});
static HIDDEN_ATTR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[hidden]").expect("hidden attribute selector should be valid"));

/// Aggregate of text present in the document but not visually rendered.
#[derive(Debug, Clone, Default)]
pub struct HiddenContent {
    pub hidden_text_length: usize,
    pub hidden_elements_count: usize,
    pub findings: Vec<HiddenFinding>,
}

/// Scans for text trapped inside hidden elements.
///
/// Four independent scans run in a fixed order, one per hidden-marker kind.
/// An element carrying two markers is counted by both scans, matching the
/// per-marker measurement semantics.
pub fn detect_hidden(html: &str) -> HiddenContent {
    let document = Html::parse_document(html);
    detect_hidden_in(&document)
}

/// Same as [`detect_hidden`] against an already parsed document.
pub(crate) fn detect_hidden_in(document: &Html) -> HiddenContent {
    let scans: [(&Selector, HiddenKind); 4] = [
        (&DISPLAY_NONE, HiddenKind::DisplayNone),
        (&VISIBILITY_HIDDEN, HiddenKind::VisibilityHidden),
        (&ARIA_HIDDEN, HiddenKind::AriaHidden),
        (&HIDDEN_ATTR, HiddenKind::HiddenAttribute),
    ];

    let mut result = HiddenContent::default();
    for (selector, kind) in scans {
        for element in document.select(selector) {
            result.hidden_elements_count += 1;

            let content = normalize_whitespace(&element_text(element));
            let length = content.chars().count();
            if length <= HIDDEN_MIN_CHARS {
                continue;
            }

            result.hidden_text_length += length;
            if result.findings.len() < MAX_FINDINGS {
                result.findings.push(HiddenFinding {
                    kind,
                    preview_text: truncate_chars(&content, FINDING_PREVIEW_CHARS),
                    length,
                });
            }
        }
    }
    result
}
