use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rendersight")]
#[command(about = "Diagnose how much of a page's content search engines can actually see", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a single URL and print the visibility report
    Analyze(AnalyzeArgs),
    /// Run the HTTP analysis service
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// The URL to analyze
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub output: String,

    /// Save the JSON report to a file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Skip headless-browser rendering and analyze the raw HTML only
    #[arg(long)]
    pub no_render: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Skip headless-browser rendering and analyze the raw HTML only
    #[arg(long)]
    pub no_render: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}
