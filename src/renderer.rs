//! Best-effort browser rendering. The pipeline is the only consumer and
//! maps every [`RenderError`] to the render-disabled branch; nothing here
//! is ever fatal to an analysis.

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::error::RenderError;

/// Cap on navigation plus the network-idle wait.
pub const NAVIGATION_TIMEOUT_SECS: u64 = 30;
/// Fixed delay after navigation settles, for late-executing scripts.
pub const SETTLE_DELAY_MS: u64 = 2000;

/// What the page looks like after client-side scripts have run.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub body_text: String,
    pub body_html: String,
}

/// The rendering capability handed to the pipeline. `Disabled` always
/// yields the render-unavailable branch.
pub enum Renderer {
    Browser(BrowserRenderer),
    Disabled,
}

impl Renderer {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Renderer::Browser(_))
    }

    pub async fn render(&self, url: &str) -> Result<RenderedDocument, RenderError> {
        match self {
            Renderer::Browser(browser) => browser.render(url).await,
            Renderer::Disabled => Err(RenderError::Disabled),
        }
    }

    pub async fn shutdown(self) {
        if let Renderer::Browser(browser) = self {
            browser.close().await;
        }
    }
}

/// Headless Chromium driven over CDP. Launched once and reused for every
/// render; each render gets its own page.
pub struct BrowserRenderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserRenderer {
    pub async fn launch() -> Result<Self, RenderError> {
        let config = BrowserConfig::builder()
            .args(vec!["--no-sandbox", "--disable-dev-shm-usage", "--disable-gpu"])
            .build()
            .map_err(RenderError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        // The CDP event loop must be polled for the browser to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::info!("headless browser launched");
        Ok(Self {
            browser,
            handler_task,
        })
    }

    pub async fn render(&self, url: &str) -> Result<RenderedDocument, RenderError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        let result = self.render_on(&page, url).await;

        if let Err(e) = page.close().await {
            tracing::debug!(error = %e, "failed to close render page");
        }
        result
    }

    async fn render_on(&self, page: &Page, url: &str) -> Result<RenderedDocument, RenderError> {
        let navigation = async {
            page.goto(url)
                .await
                .map_err(|e| RenderError::Browser(e.to_string()))?;
            page.wait_for_navigation()
                .await
                .map_err(|e| RenderError::Browser(e.to_string()))?;
            Ok::<(), RenderError>(())
        };
        tokio::time::timeout(Duration::from_secs(NAVIGATION_TIMEOUT_SECS), navigation)
            .await
            .map_err(|_| RenderError::Timeout(NAVIGATION_TIMEOUT_SECS))??;

        tokio::time::sleep(Duration::from_millis(SETTLE_DELAY_MS)).await;

        let body_text: String = page
            .evaluate("document.body ? document.body.innerText : ''")
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?
            .into_value()
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        let body_html = page
            .content()
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        tracing::debug!(url, text_chars = body_text.chars().count(), "rendered document");

        Ok(RenderedDocument {
            body_text,
            body_html,
        })
    }

    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!(error = %e, "failed to close browser");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!(error = %e, "browser did not exit cleanly");
        }
        self.handler_task.abort();
    }
}
