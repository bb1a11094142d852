//! Rule cascade turning metrics and signals into a crawlability verdict.
//!
//! The coverage rules are mutually exclusive and evaluated top to bottom;
//! the signal overlay always runs afterwards and may escalate the risk but
//! never lowers it. Issue codes keep first-insertion order.

use crate::models::{
    ContentProfile, CoverageMetrics, Diagnosis, IssueCode, RiskLevel, SeoSignals, SignalSource,
};

/// Raw text below this while the rendered page is substantial means the
/// main content only exists client-side.
const RAW_TEXT_FLOOR: usize = 300;
const RENDERED_TEXT_CEILING: usize = 1000;
const LOW_COVERAGE: f64 = 0.3;
const MODERATE_COVERAGE: f64 = 0.5;

pub fn diagnose(
    raw: &ContentProfile,
    rendered: &ContentProfile,
    metrics: &CoverageMetrics,
    signals: &SeoSignals,
) -> Diagnosis {
    let mut issues: Vec<IssueCode> = Vec::new();
    let mut risk_level;
    let mut summary;
    let recommendation;

    if raw.text_length < RAW_TEXT_FLOOR && rendered.text_length > RENDERED_TEXT_CEILING {
        risk_level = RiskLevel::High;
        issues.push(IssueCode::MainContentMissingInHtml);
        issues.push(IssueCode::ContentRenderedByJs);
        summary = "The main content is missing from the initial HTML and only appears after \
                   JavaScript rendering. Search engines that do not execute scripts will see an \
                   almost empty page."
            .to_string();
        recommendation = "Serve the main content in the initial HTML using server-side rendering \
                          (SSR) or static site generation (SSG)."
            .to_string();
    } else if metrics.content_coverage < LOW_COVERAGE {
        risk_level = RiskLevel::Medium;
        issues.push(IssueCode::LowContentCoverage);
        issues.push(IssueCode::HeavyClientSideRendering);
        summary = "Less than 30% of the rendered content is present in the initial HTML. The \
                   page relies heavily on client-side rendering."
            .to_string();
        recommendation = "Pre-render the critical content so crawlers receive it without \
                          executing JavaScript."
            .to_string();
    } else if metrics.content_coverage < MODERATE_COVERAGE {
        risk_level = RiskLevel::Medium;
        issues.push(IssueCode::ModerateContentCoverage);
        summary = "Only part of the rendered content is present in the initial HTML. Some \
                   sections may be invisible to crawlers."
            .to_string();
        recommendation = "Check which sections are injected client-side and move the important \
                          ones into the initial HTML."
            .to_string();
    } else {
        risk_level = RiskLevel::Low;
        summary = "Most of the content is present in the initial HTML. Crawlers can see the \
                   page without executing JavaScript."
            .to_string();
        recommendation = "No critical visibility issues detected. Re-check after major frontend \
                          changes."
            .to_string();
    }

    // Signal overlay: escalates, never de-escalates.
    if !signals.title.exists {
        risk_level = RiskLevel::High;
        summary = format!("Critical: Missing title tag. {summary}");
        push_unique(&mut issues, IssueCode::MissingTitle);
    }
    if !signals.meta_description.exists {
        push_unique(&mut issues, IssueCode::MissingMetaDescription);
    }
    if !signals.h1.exists {
        push_unique(&mut issues, IssueCode::MissingH1);
    } else if signals.h1.source == SignalSource::Rendered {
        push_unique(&mut issues, IssueCode::H1OnlyInRenderedDom);
    }

    Diagnosis {
        risk_level,
        issues,
        summary,
        recommendation,
    }
}

/// Verdict stub attached to fetch-failure responses so callers can render a
/// consistent failure state.
pub fn fetch_failed_diagnosis() -> Diagnosis {
    Diagnosis {
        risk_level: RiskLevel::High,
        issues: vec![IssueCode::FetchFailed],
        summary: "The page could not be fetched, so crawlers are likely unable to reach it \
                  either."
            .to_string(),
        recommendation: "Verify the URL is publicly reachable and the server responds within \
                         30 seconds."
            .to_string(),
    }
}

/// Verdict stub attached to unexpected pipeline failures.
pub fn analysis_error_diagnosis() -> Diagnosis {
    Diagnosis {
        risk_level: RiskLevel::High,
        issues: vec![IssueCode::AnalysisError],
        summary: "The analysis failed before a verdict could be produced.".to_string(),
        recommendation: "Retry the analysis; if the failure persists, the page may be \
                         malformed."
            .to_string(),
    }
}

fn push_unique(issues: &mut Vec<IssueCode>, code: IssueCode) {
    if !issues.contains(&code) {
        issues.push(code);
    }
}
