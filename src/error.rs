use thiserror::Error;

/// Fatal analysis failures. Each variant maps to one HTTP failure shape.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The caller supplied an unusable URL. User-correctable (400).
    #[error("invalid URL: {0}")]
    Validation(String),

    /// Retrieving the raw HTML failed. Fatal for the whole analysis, never
    /// retried (500).
    #[error("failed to fetch page: {0}")]
    Fetch(String),

    /// Anything unexpected inside extraction, classification or diagnosis
    /// (500).
    #[error("analysis failed: {0}")]
    Analysis(String),
}

/// Failures inside the rendering collaborator. Never escapes the pipeline;
/// the orchestrator maps every variant to the render-disabled branch.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering is disabled")]
    Disabled,

    #[error("browser error: {0}")]
    Browser(String),

    #[error("navigation timed out after {0}s")]
    Timeout(u64),
}
