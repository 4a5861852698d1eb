use crate::{Error, Result};
use async_trait::async_trait;
use eoka::Page;

/// The browser capabilities the verification flow needs. The flow only talks
/// to this trait, so it can run against a fake without launching a renderer.
#[async_trait]
pub trait FormDriver: Send + Sync {
    /// Navigate to a URL.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Block until the element is visible, or fail with a navigation timeout.
    async fn wait_visible(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Write a value into a form control. Fails if the control is absent.
    async fn set_value(&self, selector: &str, value: &str) -> Result<()>;

    /// Click a control. Fails if the control is absent.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Wait for text to appear on the page. Returns false on timeout instead
    /// of erroring; the caller decides whether that matters.
    async fn wait_for_text(&self, text: &str, timeout_ms: u64) -> Result<bool>;

    /// Sleep for a fixed interval.
    async fn settle(&self, ms: u64);

    /// Capture the full rendered page markup.
    async fn capture_markup(&self) -> Result<String>;
}

/// Production driver over an `eoka::Page`.
pub struct PageDriver<'a> {
    page: &'a Page,
}

impl<'a> PageDriver<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    async fn element_exists(&self, selector: &str) -> Result<bool> {
        let js = format!(
            "!!document.querySelector({})",
            serde_json::to_string(selector).unwrap()
        );
        Ok(self.page.evaluate(&js).await?)
    }
}

#[async_trait]
impl FormDriver for PageDriver<'_> {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    async fn wait_visible(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        self.page
            .wait_for_visible(selector, timeout_ms)
            .await
            .map_err(|e| {
                Error::NavigationTimeout(format!(
                    "'{}' not visible within {}ms: {}",
                    selector, timeout_ms, e
                ))
            })
            .map(|_| ())
    }

    async fn set_value(&self, selector: &str, value: &str) -> Result<()> {
        if !self.element_exists(selector).await? {
            return Err(Error::ElementNotFound(selector.to_string()));
        }
        self.page.fill(selector, value).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        if !self.element_exists(selector).await? {
            return Err(Error::ElementNotFound(selector.to_string()));
        }
        self.page.click(selector).await?;
        Ok(())
    }

    async fn wait_for_text(&self, text: &str, timeout_ms: u64) -> Result<bool> {
        // Best-effort: some result pages never show the text (e.g. a
        // mismatch verdict), so a timeout is a signal, not a failure.
        Ok(self.page.wait_for_text(text, timeout_ms).await.is_ok())
    }

    async fn settle(&self, ms: u64) {
        self.page.wait(ms).await;
    }

    async fn capture_markup(&self) -> Result<String> {
        Ok(self
            .page
            .evaluate("document.documentElement.outerHTML")
            .await?)
    }
}
