//! Sequences the whole diagnostic: fetch + render, classification of both
//! document variants, signals, metrics, diagnosis, report assembly. Only
//! the fetch is fatal; everything downstream of it degrades gracefully.

use chrono::Utc;
use scraper::Html;
use std::time::Instant;
use url::Url;

use crate::classifier;
use crate::diagnoser;
use crate::error::{AnalyzeError, RenderError};
use crate::extractor;
use crate::fetcher::DocumentFetcher;
use crate::hidden;
use crate::metrics;
use crate::models::{
    AnalysisReport, ContentProfile, FetchSummary, HiddenFinding, HtmlContentReport, MetricsReport,
    RenderedContentReport, ReportMeta,
};
use crate::renderer::Renderer;
use crate::signals;

pub struct Analyzer {
    fetcher: DocumentFetcher,
    renderer: Renderer,
}

impl Analyzer {
    pub fn new(renderer: Renderer) -> anyhow::Result<Self> {
        Ok(Self {
            fetcher: DocumentFetcher::new()?,
            renderer,
        })
    }

    pub fn render_enabled(&self) -> bool {
        self.renderer.is_enabled()
    }

    /// Validates an analysis target: parseable URL, http(s) scheme.
    pub fn parse_url(url: &str) -> Result<Url, AnalyzeError> {
        let parsed =
            Url::parse(url).map_err(|e| AnalyzeError::Validation(format!("'{url}': {e}")))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(AnalyzeError::Validation(format!(
                "unsupported URL scheme '{scheme}': only http and https are supported"
            ))),
        }
    }

    pub async fn analyze(&self, url: &str) -> Result<AnalysisReport, AnalyzeError> {
        let target = Self::parse_url(url)?;
        let started = Instant::now();

        // The fetch and the render take only the URL; run them side by side.
        let (fetched, render_outcome) =
            tokio::join!(self.fetcher.fetch(&target), self.renderer.render(url));
        let fetched = fetched?;

        let rendered_html = match render_outcome {
            Ok(document) => Some(document.body_html),
            Err(RenderError::Disabled) => None,
            Err(e) => {
                tracing::warn!(url, error = %e, "rendering unavailable, falling back to raw HTML");
                None
            }
        };

        // Classification of the two variants is independent; both parse and
        // scan off the async runtime.
        let raw_html = fetched.html.clone();
        let raw_task = tokio::task::spawn_blocking(move || build_profile(&raw_html));
        let rendered_task = rendered_html.clone().map(|html| {
            tokio::task::spawn_blocking(move || build_profile(&html))
        });

        let (raw_profile, hidden_findings) = raw_task
            .await
            .map_err(|e| AnalyzeError::Analysis(e.to_string()))?;
        let (render_enabled, rendered_profile) = match rendered_task {
            Some(task) => {
                let (profile, _) = task
                    .await
                    .map_err(|e| AnalyzeError::Analysis(e.to_string()))?;
                (true, profile)
            }
            // Without a rendered document every rendered-side metric mirrors
            // the raw side.
            None => (false, raw_profile.clone()),
        };

        let seo_signals = signals::analyze_signals(&fetched.html, rendered_html.as_deref());
        let coverage = metrics::compute(&raw_profile, &rendered_profile, render_enabled);
        let diagnosis =
            diagnoser::diagnose(&raw_profile, &rendered_profile, &coverage, &seo_signals);

        tracing::info!(
            url,
            risk = ?diagnosis.risk_level,
            coverage = coverage.content_coverage,
            "analysis complete"
        );

        Ok(AnalysisReport {
            url: url.to_string(),
            fetch: FetchSummary {
                status: fetched.status,
                html_size: fetched.html_size_bytes,
                headers: fetched.headers,
            },
            html_content: HtmlContentReport {
                profile: raw_profile,
                hidden_findings,
            },
            rendered_content: RenderedContentReport {
                enabled: render_enabled,
                profile: rendered_profile,
            },
            metrics: MetricsReport::from(&coverage),
            seo_signals,
            diagnosis,
            meta: ReportMeta {
                response_time: started.elapsed().as_millis() as u64,
                timestamp: Utc::now().to_rfc3339(),
            },
        })
    }

    pub async fn shutdown(self) {
        self.renderer.shutdown().await;
    }
}

/// Runs extraction, semantic classification and hidden-content detection
/// over one parse of the document.
pub fn build_profile(html: &str) -> (ContentProfile, Vec<HiddenFinding>) {
    let document = Html::parse_document(html);

    let text = extractor::extract_text_in(&document);
    let semantic_text_length = classifier::semantic_text_length_in(&document);
    let hidden_content = hidden::detect_hidden_in(&document);

    let profile = ContentProfile {
        text_length: text.text_length,
        semantic_text_length,
        hidden_text_length: hidden_content.hidden_text_length,
        hidden_elements_count: hidden_content.hidden_elements_count,
        paragraph_count: text.paragraph_count,
        preview_text: text.preview_text,
        full_text: text.full_text,
    };
    (profile, hidden_content.findings)
}
