mod driver;
mod flow;

pub use driver::{FormDriver, PageDriver};
pub use flow::{run_flow, Stage};

use crate::config::{BrowserConfig, Contract};
use crate::input::PassportInput;
use crate::verdict::{self, Verification};
use crate::{Error, Result};
use eoka::{Browser, Page};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Run the flow against any driver under the contract's hard deadline and
/// turn the captured markup into a verdict. Deadline expiry cancels the
/// whole flow; there is no partial result.
pub async fn verify<D: FormDriver + ?Sized>(
    driver: &D,
    contract: &Contract,
    input: &PassportInput,
) -> Result<Verification> {
    input.validate()?;

    let deadline = Duration::from_secs(contract.timeouts.deadline_secs);
    let markup = tokio::time::timeout(deadline, flow::run_flow(driver, contract, input))
        .await
        .map_err(|_| Error::Deadline(contract.timeouts.deadline_secs))??;

    let matched = verdict::is_match(&markup, &contract.result.marker);
    debug!("verdict marker present: {}", matched);

    Ok(Verification {
        matched,
        raw_html: markup,
    })
}

/// Owns one browser session, scoped to a single run.
pub struct Runner {
    browser: Browser,
    page: Page,
}

impl Runner {
    /// Launch a browser for one run.
    pub async fn new(config: &BrowserConfig) -> Result<Self> {
        let stealth = eoka::StealthConfig {
            headless: config.headless,
            proxy: config.proxy.clone(),
            user_agent: config.user_agent.clone(),
            viewport_width: config.viewport.as_ref().map(|v| v.width).unwrap_or(1280),
            viewport_height: config.viewport.as_ref().map(|v| v.height).unwrap_or(720),
            ..Default::default()
        };

        debug!(
            "Launching browser (headless: {}, proxy: {:?})",
            config.headless, config.proxy
        );
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page("about:blank").await?;

        Ok(Self { browser, page })
    }

    /// Get a reference to the page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Run one verification. Fail-fast: the first stage failure or deadline
    /// expiry aborts the run with no retry.
    pub async fn run(&mut self, contract: &Contract, input: &PassportInput) -> Result<Verification> {
        let driver = PageDriver::new(&self.page);
        match verify(&driver, contract, input).await {
            Ok(verification) => Ok(verification),
            Err(e) => {
                if !e.is_input() {
                    self.handle_failure(contract).await;
                }
                Err(e)
            }
        }
    }

    async fn handle_failure(&self, contract: &Contract) {
        if let Some(ref on_failure) = contract.on_failure {
            if let Some(ref screenshot_path) = on_failure.screenshot {
                let timestamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                let path = screenshot_path.replace("{timestamp}", &timestamp.to_string());
                debug!("Saving failure screenshot to: {}", path);
                if let Ok(data) = self.page.screenshot().await {
                    if let Err(e) = std::fs::write(&path, data) {
                        warn!("Failed to save screenshot: {}", e);
                    }
                }
            }
        }
    }

    /// Close the browser. Called unconditionally at run end.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake whose navigation never completes, for deadline tests. Counts
    /// calls so input rejection can be shown to produce no session activity.
    #[derive(Default)]
    struct HangingDriver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FormDriver for HangingDriver {
        async fn navigate(&self, _url: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<()>().await;
            unreachable!()
        }

        async fn wait_visible(&self, _selector: &str, _timeout_ms: u64) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn set_value(&self, _selector: &str, _value: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn click(&self, _selector: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn wait_for_text(&self, _text: &str, _timeout_ms: u64) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        async fn settle(&self, _ms: u64) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        async fn capture_markup(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(String::new())
        }
    }

    fn contract_with_deadline(secs: u64) -> Contract {
        Contract::parse(&format!(
            r#"
name: "Test"
page:
  url: "https://example.com/verify"
timeouts:
  deadline_secs: {}
"#,
            secs
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_deadline_expiry_aborts_run() {
        let driver = HangingDriver::default();
        let contract = contract_with_deadline(0);
        let input = PassportInput::new("홍길동", "M12345678");

        let err = verify(&driver, &contract, &input).await.unwrap_err();
        assert!(matches!(err, Error::Deadline(0)));
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_without_session_activity() {
        let driver = HangingDriver::default();
        let contract = contract_with_deadline(90);
        let input = PassportInput::new("", "M12345678");

        let err = verify(&driver, &contract, &input).await.unwrap_err();
        assert!(err.is_input());
        assert_eq!(driver.calls.load(Ordering::SeqCst), 0);
    }
}
