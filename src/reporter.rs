use anyhow::Result;
use colored::*;
use std::fs::File;
use std::io::Write;

use crate::models::{AnalysisReport, RiskLevel};

pub struct Reporter;

impl Reporter {
    pub fn print_text_report(report: &AnalysisReport) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "Rendersight - Content Visibility Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "URL".bright_white().bold(), report.url);
        println!(
            "{}: {}",
            "Timestamp".bright_white().bold(),
            report.meta.timestamp
        );
        println!();

        // Fetch
        println!("{}", "Fetch".bright_yellow().bold().underline());
        println!(
            "  Status:    {}",
            if report.fetch.status < 300 {
                report.fetch.status.to_string().bright_green()
            } else if report.fetch.status < 400 {
                report.fetch.status.to_string().yellow()
            } else {
                report.fetch.status.to_string().bright_red()
            }
        );
        println!("  HTML size: {} bytes", report.fetch.html_size);
        for (name, value) in &report.fetch.headers {
            println!("  {}: {}", name.dimmed(), value);
        }
        println!();

        // Content
        println!("{}", "Content".bright_yellow().bold().underline());
        println!(
            "  Raw text:       {} chars, {} paragraphs",
            report.html_content.profile.text_length,
            report.html_content.profile.paragraph_count
        );
        println!(
            "  Semantic text:  {} chars",
            report.html_content.profile.semantic_text_length
        );
        println!(
            "  Hidden text:    {} chars in {} elements",
            report.html_content.profile.hidden_text_length,
            report.html_content.profile.hidden_elements_count
        );
        if report.rendered_content.enabled {
            println!(
                "  Rendered text:  {} chars",
                report.rendered_content.profile.text_length
            );
        } else {
            println!("  Rendered text:  {}", "rendering disabled".dimmed());
        }
        for finding in &report.html_content.hidden_findings {
            println!(
                "  {} {}",
                "hidden:".bright_red(),
                finding.preview_text.dimmed()
            );
        }
        println!();

        // Metrics
        println!("{}", "Metrics".bright_yellow().bold().underline());
        println!(
            "  Content coverage:  {}",
            Self::format_ratio(report.metrics.content_coverage)
        );
        println!(
            "  Semantic coverage: {}",
            Self::format_ratio(report.metrics.semantic_coverage)
        );
        println!(
            "  Semantic ratio:    {} (raw) / {} (rendered)",
            Self::format_ratio(report.metrics.html_semantic_ratio),
            Self::format_ratio(report.metrics.rendered_semantic_ratio)
        );
        println!(
            "  Hidden ratio:      {} (raw) / {} (rendered)",
            Self::format_ratio(report.metrics.html_hidden_ratio),
            Self::format_ratio(report.metrics.rendered_hidden_ratio)
        );
        println!();

        // Signals
        println!("{}", "SEO Signals".bright_yellow().bold().underline());
        println!(
            "  Title:            {}",
            Self::format_presence(report.seo_signals.title.exists)
        );
        println!(
            "  Meta description: {}",
            Self::format_presence(report.seo_signals.meta_description.exists)
        );
        println!(
            "  H1:               {}",
            Self::format_presence(report.seo_signals.h1.exists)
        );
        println!(
            "  Canonical:        {}",
            Self::format_presence(report.seo_signals.canonical.exists)
        );
        println!("  Hreflang tags:    {}", report.seo_signals.hreflang_count);
        println!();

        // Diagnosis
        println!("{}", "Diagnosis".bright_yellow().bold().underline());
        let risk = match report.diagnosis.risk_level {
            RiskLevel::Low => "LOW".bright_green().bold(),
            RiskLevel::Medium => "MEDIUM".yellow().bold(),
            RiskLevel::High => "HIGH".bright_red().bold(),
        };
        println!("  Risk level: {}", risk);
        for issue in &report.diagnosis.issues {
            println!("  [{}] {}", "ISSUE".bright_red(), issue);
        }
        println!("  {}", report.diagnosis.summary);
        println!("  {}", report.diagnosis.recommendation.bright_white());

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn save_json_report(report: &AnalysisReport, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(filename)?;
        file.write_all(json.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }

    fn format_ratio(value: f64) -> ColoredString {
        let formatted = format!("{:.1}%", value * 100.0);
        if value >= 0.5 {
            formatted.bright_green()
        } else if value >= 0.3 {
            formatted.yellow()
        } else {
            formatted.bright_red()
        }
    }

    fn format_presence(exists: bool) -> ColoredString {
        if exists {
            "present".bright_green()
        } else {
            "missing".bright_red()
        }
    }
}
