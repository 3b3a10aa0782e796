//! Chromium-backed context provider
//!
//! One Chromium process is launched per service. Every request gets its own
//! CDP browser context so cookies and storage never leak between searches.

use super::traits::{BrowserContext, BrowserError, BrowserPage, ContextProvider, Viewport};
use crate::config::BrowserSettings;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{BrowserContextId, CloseParams};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::{
    Headers, SetExtraHttpHeadersParams, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

/// Owns the Chromium process and its CDP event loop
pub struct ChromiumProvider {
    browser: Arc<Browser>,
    handler: JoinHandle<()>,
}

impl ChromiumProvider {
    /// Launch Chromium with the given settings
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, BrowserError> {
        let config = build_config(settings)?;

        info!("Launching Chromium (headless: {})", settings.headless);
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    let message = e.to_string();
                    // chromiumoxide cannot decode every CDP event Chrome emits
                    if message.contains("data did not match any variant of untagged enum Message")
                        || message.contains("Failed to deserialize WS response")
                    {
                        trace!("Ignoring undecodable CDP event: {}", message);
                    } else {
                        error!("Browser handler error: {:?}", e);
                    }
                }
            }
            info!("Browser handler task completed");
        });

        Ok(Self {
            browser: Arc::new(browser),
            handler,
        })
    }

    /// Ask Chromium to exit
    pub async fn shutdown(&self) {
        info!("Shutting down Chromium");
        if let Err(e) = self.browser.execute(CloseParams::default()).await {
            warn!("Failed to close browser cleanly: {}", e);
        }
    }
}

impl Drop for ChromiumProvider {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl ContextProvider for ChromiumProvider {
    async fn acquire(&self) -> Result<Box<dyn BrowserContext>, BrowserError> {
        let created = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await
            .map_err(|e| BrowserError::Context(e.to_string()))?;

        let id = created.result.browser_context_id.clone();
        debug!("Created browser context {:?}", id);

        Ok(Box::new(ChromiumContext {
            browser: self.browser.clone(),
            id,
        }))
    }
}

struct ChromiumContext {
    browser: Arc<Browser>,
    id: BrowserContextId,
}

#[async_trait]
impl BrowserContext for ChromiumContext {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        let params = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(self.id.clone())
            .build()
            .map_err(BrowserError::Page)?;

        let page = self.browser.new_page(params).await?;
        Ok(Box::new(ChromiumPage { page }))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.browser
            .execute(DisposeBrowserContextParams::new(self.id.clone()))
            .await
            .map_err(|e| BrowserError::Context(e.to_string()))?;
        debug!("Disposed browser context {:?}", self.id);
        Ok(())
    }
}

struct ChromiumPage {
    page: Page,
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn set_extra_http_headers(
        &self,
        headers: HashMap<String, String>,
    ) -> Result<(), BrowserError> {
        // Keep navigator.userAgent consistent with the header
        if let Some(user_agent) = headers.get("User-Agent") {
            self.page
                .execute(SetUserAgentOverrideParams::new(user_agent.clone()))
                .await?;
        }

        let headers = serde_json::to_value(headers).map_err(|e| BrowserError::Page(e.to_string()))?;
        self.page
            .execute(SetExtraHttpHeadersParams::new(Headers::new(headers)))
            .await?;
        Ok(())
    }

    async fn set_viewport_size(&self, viewport: Viewport) -> Result<(), BrowserError> {
        self.page
            .execute(SetDeviceMetricsOverrideParams::new(
                i64::from(viewport.width),
                i64::from(viewport.height),
                1.0,
                false,
            ))
            .await?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn content(&self) -> Result<String, BrowserError> {
        Ok(self.page.content().await?)
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.page.clone().close().await?;
        Ok(())
    }
}

fn build_config(settings: &BrowserSettings) -> Result<BrowserConfig, BrowserError> {
    let request_timeout = Duration::try_from_secs_f64(settings.request_timeout).map_err(|e| {
        BrowserError::Launch(format!(
            "invalid browser.request_timeout {}: {}",
            settings.request_timeout, e
        ))
    })?;

    let mut builder = BrowserConfig::builder()
        .request_timeout(request_timeout)
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--disable-notifications")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--hide-scrollbars")
        .arg("--mute-audio");

    if !settings.headless {
        builder = builder.with_head();
    }

    if let Some(path) = executable_path(settings) {
        info!("Using browser executable: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    if settings.disable_sandbox || in_container() {
        info!("Disabling Chromium sandbox");
        builder = builder.arg("--no-sandbox").arg("--disable-setuid-sandbox");
    }

    for arg in &settings.extra_args {
        builder = builder.arg(arg.as_str());
    }

    builder.build().map_err(BrowserError::Launch)
}

/// Explicit executable from settings, then `CHROMIUM_PATH`
///
/// `None` leaves detection to chromiumoxide.
fn executable_path(settings: &BrowserSettings) -> Option<PathBuf> {
    if let Some(path) = &settings.executable {
        return Some(path.clone());
    }

    let path = PathBuf::from(std::env::var("CHROMIUM_PATH").ok()?);
    if path.exists() {
        Some(path)
    } else {
        warn!(
            "CHROMIUM_PATH points to non-existent file: {}",
            path.display()
        );
        None
    }
}

/// setuid sandboxing does not work inside containers
fn in_container() -> bool {
    std::path::Path::new("/.dockerenv").exists()
        || std::env::var("container").is_ok()
        || std::env::var("KUBERNETES_SERVICE_HOST").is_ok()
}
