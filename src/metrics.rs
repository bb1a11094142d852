//! Pure ratio arithmetic over two content profiles. Every output lies in
//! `[0, 1]`; degenerate denominators resolve per the rules below instead of
//! dividing by zero.

use crate::models::{ContentProfile, CoverageMetrics, MetricsReport};

/// Share of the rendered text already present in the raw document.
///
/// A zero rendered length means there is nothing to cover: full coverage if
/// the raw side has text, zero if both sides are empty.
pub fn coverage(raw_len: usize, rendered_len: usize) -> f64 {
    if rendered_len == 0 {
        if raw_len > 0 { 1.0 } else { 0.0 }
    } else {
        (raw_len as f64 / rendered_len as f64).min(1.0)
    }
}

/// Share of a profile's text inside semantic tags. Semantic spans can
/// overlap, so the raw quotient may exceed one; clamped.
pub fn semantic_ratio(profile: &ContentProfile) -> f64 {
    if profile.text_length == 0 {
        0.0
    } else {
        (profile.semantic_text_length as f64 / profile.text_length as f64).min(1.0)
    }
}

/// Hidden share of the total including hidden: the denominator adds the
/// hidden length back onto the text length.
pub fn hidden_ratio(profile: &ContentProfile) -> f64 {
    if profile.text_length == 0 {
        0.0
    } else {
        let total = (profile.text_length + profile.hidden_text_length) as f64;
        (profile.hidden_text_length as f64 / total).min(1.0)
    }
}

/// Derives all six metrics from the two profiles. When rendering is
/// disabled the rendered profile mirrors the raw one and semantic coverage
/// is pinned to 1.0.
pub fn compute(
    raw: &ContentProfile,
    rendered: &ContentProfile,
    render_enabled: bool,
) -> CoverageMetrics {
    CoverageMetrics {
        content_coverage: coverage(raw.text_length, rendered.text_length),
        semantic_coverage: if render_enabled {
            coverage(raw.semantic_text_length, rendered.semantic_text_length)
        } else {
            1.0
        },
        html_semantic_ratio: semantic_ratio(raw),
        rendered_semantic_ratio: semantic_ratio(rendered),
        html_hidden_ratio: hidden_ratio(raw),
        rendered_hidden_ratio: hidden_ratio(rendered),
    }
}

/// Serialization-boundary rounding; internal values stay full precision.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

impl From<&CoverageMetrics> for MetricsReport {
    fn from(m: &CoverageMetrics) -> Self {
        MetricsReport {
            content_coverage: round3(m.content_coverage),
            semantic_coverage: round3(m.semantic_coverage),
            html_semantic_ratio: round3(m.html_semantic_ratio),
            rendered_semantic_ratio: round3(m.rendered_semantic_ratio),
            html_hidden_ratio: round3(m.html_hidden_ratio),
            rendered_hidden_ratio: round3(m.rendered_hidden_ratio),
        }
    }
}
