use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw document retrieved by the fetcher. Owned by the pipeline for the
/// lifetime of one analysis; nothing survives across requests.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub html_size_bytes: usize,
    pub headers: BTreeMap<String, String>,
    pub html: String,
}

/// Text measurements for one document variant (raw HTML or rendered DOM).
///
/// `preview_text` is a plain prefix of `full_text` truncated to 200
/// characters; all lengths are Unicode scalar counts, not byte counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProfile {
    pub text_length: usize,
    pub semantic_text_length: usize,
    pub hidden_text_length: usize,
    pub hidden_elements_count: usize,
    pub paragraph_count: usize,
    pub preview_text: String,
    pub full_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiddenKind {
    #[serde(rename = "display:none")]
    DisplayNone,
    #[serde(rename = "visibility:hidden")]
    VisibilityHidden,
    #[serde(rename = "aria-hidden")]
    AriaHidden,
    #[serde(rename = "hidden-attribute")]
    HiddenAttribute,
}

/// A sample of text trapped inside a hidden element, kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenFinding {
    pub kind: HiddenKind,
    pub preview_text: String,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSource {
    Html,
    Rendered,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Signal {
    pub exists: bool,
    pub source: SignalSource,
}

impl Signal {
    pub fn found(source: SignalSource) -> Self {
        Self {
            exists: true,
            source,
        }
    }

    pub fn missing() -> Self {
        Self {
            exists: false,
            source: SignalSource::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanonicalSignal {
    pub exists: bool,
}

/// Presence and provenance of the canonical SEO signals for a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSignals {
    pub title: Signal,
    pub meta_description: Signal,
    pub h1: Signal,
    pub canonical: CanonicalSignal,
    pub hreflang_count: usize,
}

/// The six coverage/quality ratios, all in `[0, 1]`.
///
/// Kept at full precision internally; rounded to 3 decimals only when the
/// report is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoverageMetrics {
    pub content_coverage: f64,
    pub semantic_coverage: f64,
    pub html_semantic_ratio: f64,
    pub rendered_semantic_ratio: f64,
    pub html_hidden_ratio: f64,
    pub rendered_hidden_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    MainContentMissingInHtml,
    ContentRenderedByJs,
    LowContentCoverage,
    HeavyClientSideRendering,
    ModerateContentCoverage,
    MissingTitle,
    MissingMetaDescription,
    MissingH1,
    H1OnlyInRenderedDom,
    FetchFailed,
    AnalysisError,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::MainContentMissingInHtml => "MAIN_CONTENT_MISSING_IN_HTML",
            IssueCode::ContentRenderedByJs => "CONTENT_RENDERED_BY_JS",
            IssueCode::LowContentCoverage => "LOW_CONTENT_COVERAGE",
            IssueCode::HeavyClientSideRendering => "HEAVY_CLIENT_SIDE_RENDERING",
            IssueCode::ModerateContentCoverage => "MODERATE_CONTENT_COVERAGE",
            IssueCode::MissingTitle => "MISSING_TITLE",
            IssueCode::MissingMetaDescription => "MISSING_META_DESCRIPTION",
            IssueCode::MissingH1 => "MISSING_H1",
            IssueCode::H1OnlyInRenderedDom => "H1_ONLY_IN_RENDERED_DOM",
            IssueCode::FetchFailed => "FETCH_FAILED",
            IssueCode::AnalysisError => "ANALYSIS_ERROR",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crawlability verdict. `issues` preserves first-insertion order; summary
/// composition and tests depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub risk_level: RiskLevel,
    pub issues: Vec<IssueCode>,
    pub summary: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSummary {
    pub status: u16,
    pub html_size: usize,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlContentReport {
    #[serde(flatten)]
    pub profile: ContentProfile,
    pub hidden_findings: Vec<HiddenFinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedContentReport {
    pub enabled: bool,
    #[serde(flatten)]
    pub profile: ContentProfile,
}

/// Ratio block of the wire report, rounded to 3 decimal places.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub content_coverage: f64,
    pub semantic_coverage: f64,
    pub html_semantic_ratio: f64,
    pub rendered_semantic_ratio: f64,
    pub html_hidden_ratio: f64,
    pub rendered_hidden_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub response_time: u64,
    pub timestamp: String,
}

/// The full response body of a successful analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    pub fetch: FetchSummary,
    pub html_content: HtmlContentReport,
    pub rendered_content: RenderedContentReport,
    pub metrics: MetricsReport,
    pub seo_signals: SeoSignals,
    pub diagnosis: Diagnosis,
    #[serde(rename = "_meta")]
    pub meta: ReportMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_codes_serialize_as_screaming_snake_case() {
        for code in [
            IssueCode::MainContentMissingInHtml,
            IssueCode::ContentRenderedByJs,
            IssueCode::LowContentCoverage,
            IssueCode::HeavyClientSideRendering,
            IssueCode::ModerateContentCoverage,
            IssueCode::MissingTitle,
            IssueCode::MissingMetaDescription,
            IssueCode::MissingH1,
            IssueCode::H1OnlyInRenderedDom,
            IssueCode::FetchFailed,
            IssueCode::AnalysisError,
        ] {
            let wire = serde_json::to_value(code).unwrap();
            assert_eq!(wire, serde_json::Value::String(code.as_str().to_string()));
        }
    }

    #[test]
    fn risk_levels_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"MEDIUM\""
        );
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn hidden_kinds_serialize_as_marker_names() {
        assert_eq!(
            serde_json::to_string(&HiddenKind::DisplayNone).unwrap(),
            "\"display:none\""
        );
        assert_eq!(
            serde_json::to_string(&HiddenKind::VisibilityHidden).unwrap(),
            "\"visibility:hidden\""
        );
        assert_eq!(
            serde_json::to_string(&HiddenKind::AriaHidden).unwrap(),
            "\"aria-hidden\""
        );
        assert_eq!(
            serde_json::to_string(&HiddenKind::HiddenAttribute).unwrap(),
            "\"hidden-attribute\""
        );
    }

    #[test]
    fn content_profile_uses_camel_case_keys() {
        let profile = ContentProfile {
            text_length: 10,
            preview_text: "hello".to_string(),
            full_text: "hello".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("textLength").is_some());
        assert!(value.get("semanticTextLength").is_some());
        assert!(value.get("hiddenElementsCount").is_some());
        assert!(value.get("paragraphCount").is_some());
        assert!(value.get("previewText").is_some());
        assert!(value.get("text_length").is_none());
    }
}
