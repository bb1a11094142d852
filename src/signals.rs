use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::models::{CanonicalSignal, SeoSignals, Signal, SignalSource};

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_DESC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"]"#)
        .expect("meta description selector should be valid")
});
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("h1 selector should be valid"));
static CANONICAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"link[rel="canonical"]"#).expect("canonical selector should be valid")
});
static HREFLANG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("link[hreflang]").expect("hreflang selector should be valid"));

/// Detects presence and source of the canonical SEO signals.
///
/// Everything is read from the raw HTML; only the H1 check falls back to the
/// rendered document when the raw HTML has none.
pub fn analyze_signals(raw_html: &str, rendered_html: Option<&str>) -> SeoSignals {
    let raw = Html::parse_document(raw_html);

    let title = if has_title(&raw) {
        Signal::found(SignalSource::Html)
    } else {
        Signal::missing()
    };

    let meta_description = if has_meta_description(&raw) {
        Signal::found(SignalSource::Html)
    } else {
        Signal::missing()
    };

    let h1 = if has_h1(&raw) {
        Signal::found(SignalSource::Html)
    } else if rendered_html.is_some_and(|html| has_h1(&Html::parse_document(html))) {
        Signal::found(SignalSource::Rendered)
    } else {
        Signal::missing()
    };

    let canonical = CanonicalSignal {
        exists: raw.select(&CANONICAL_SELECTOR).next().is_some(),
    };
    let hreflang_count = raw.select(&HREFLANG_SELECTOR).count();

    SeoSignals {
        title,
        meta_description,
        h1,
        canonical,
        hreflang_count,
    }
}

fn has_title(document: &Html) -> bool {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .is_some_and(|el| !el.text().collect::<String>().trim().is_empty())
}

fn has_meta_description(document: &Html) -> bool {
    document
        .select(&META_DESC_SELECTOR)
        .any(|el| el.value().attr("content").is_some_and(|c| !c.trim().is_empty()))
}

fn has_h1(document: &Html) -> bool {
    document.select(&H1_SELECTOR).next().is_some()
}
