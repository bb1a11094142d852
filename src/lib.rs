pub mod classifier;
pub mod cli;
pub mod config;
pub mod diagnoser;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod hidden;
pub mod http_client;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod renderer;
pub mod reporter;
pub mod server;
pub mod signals;

use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cli::{AnalyzeArgs, Cli, Command, ServeArgs};
use config::Config;
use pipeline::Analyzer;
use renderer::{BrowserRenderer, Renderer};
use reporter::Reporter;

pub async fn run(args: Cli) -> Result<()> {
    match args.command {
        Command::Analyze(analyze_args) => run_analyze(analyze_args).await,
        Command::Serve(serve_args) => run_serve(serve_args).await,
    }
}

async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let args = match load_config(args.config.as_deref())? {
        Some(config) => config.merge_with_analyze(&args),
        None => args,
    };

    println!(
        "{}",
        "Rendersight - SEO Content Visibility".bright_cyan().bold()
    );
    println!("{}", "=".repeat(50).bright_blue());
    println!();
    println!("{} {}", "Analyzing:".bright_white().bold(), args.url);
    if args.no_render {
        println!(
            "{} {}",
            "Rendering:".bright_white().bold(),
            "disabled".dimmed()
        );
    }
    println!();

    let renderer = build_renderer(args.no_render).await;
    let analyzer = Analyzer::new(renderer)?;
    if !args.no_render && !analyzer.render_enabled() {
        println!(
            "{} {}",
            "Note:".yellow().bold(),
            "headless browser unavailable, comparing raw HTML only"
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("[{elapsed_precise}] {spinner:.cyan} {msg}")
            .expect("Progress bar template should be valid"),
    );
    spinner.set_message("Fetching and classifying...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = analyzer.analyze(&args.url).await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            analyzer.shutdown().await;
            anyhow::bail!(e);
        }
    };

    if args.verbose {
        println!("{} {:#?}", "Raw profile:".bright_white().bold(), report.html_content.profile);
    }

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        _ => {
            Reporter::print_text_report(&report);
        }
    }

    if let Some(filename) = args.save {
        Reporter::save_json_report(&report, &filename)?;
    }

    analyzer.shutdown().await;
    Ok(())
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let args = match load_config(args.config.as_deref())? {
        Some(config) => config.merge_with_serve(&args),
        None => args,
    };

    let renderer = build_renderer(args.no_render).await;
    let analyzer = Arc::new(Analyzer::new(renderer)?);

    println!(
        "{} http://{}:{}/analyze",
        "Serving:".bright_white().bold(),
        args.host,
        args.port
    );

    server::serve(&args.host, args.port, analyzer).await
}

/// Rendering is optional enrichment: a browser that fails to launch
/// downgrades to the render-disabled path instead of aborting.
async fn build_renderer(no_render: bool) -> Renderer {
    if no_render {
        return Renderer::Disabled;
    }
    match BrowserRenderer::launch().await {
        Ok(browser) => Renderer::Browser(browser),
        Err(e) => {
            tracing::warn!(error = %e, "headless browser unavailable, continuing without rendering");
            Renderer::Disabled
        }
    }
}

fn load_config(path: Option<&str>) -> Result<Option<Config>> {
    match path {
        Some(path) => Config::from_file(Path::new(path)).map(Some),
        None => Config::from_default_paths(),
    }
}
