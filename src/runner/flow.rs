use super::driver::FormDriver;
use crate::config::Contract;
use crate::input::PassportInput;
use crate::Result;
use std::fmt;
use tracing::{debug, info};

/// The fixed ordered stages of one verification run. Any stage failure
/// aborts the run; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Navigate,
    AwaitForm,
    FillFields,
    Submit,
    Settle,
    Capture,
}

impl Stage {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::AwaitForm => "await_form",
            Self::FillFields => "fill_fields",
            Self::Submit => "submit",
            Self::Settle => "settle",
            Self::Capture => "capture",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Execute the stages in strict order and return the captured markup.
pub async fn run_flow<D: FormDriver + ?Sized>(
    driver: &D,
    contract: &Contract,
    input: &PassportInput,
) -> Result<String> {
    info!("{}: {}", Stage::Navigate, contract.page.url);
    driver.navigate(&contract.page.url).await?;

    debug!("{}: {}", Stage::AwaitForm, contract.page.form);
    driver
        .wait_visible(&contract.page.form, contract.timeouts.form_wait_ms)
        .await?;

    let fields = [
        (&contract.page.fields.name, &input.name),
        (&contract.page.fields.passport_no, &input.passport_no),
        (&contract.page.fields.issue_date, &input.issue_date),
        (&contract.page.fields.expire_date, &input.expire_date),
        (&contract.page.fields.birth_date, &input.birth_date),
    ];
    for (selector, value) in fields {
        debug!("{}: {}", Stage::FillFields, selector);
        driver.set_value(selector, value).await?;
    }

    info!("{}: {}", Stage::Submit, contract.page.submit);
    driver.click(&contract.page.submit).await?;

    match contract.result.wait_text {
        Some(ref text) => {
            debug!("{}: waiting for '{}'", Stage::Settle, text);
            if !driver
                .wait_for_text(text, contract.timeouts.result_wait_ms)
                .await?
            {
                debug!(
                    "{}: result text not seen, sleeping {}ms",
                    Stage::Settle,
                    contract.timeouts.settle_ms
                );
                driver.settle(contract.timeouts.settle_ms).await;
            }
        }
        None => {
            debug!("{}: sleeping {}ms", Stage::Settle, contract.timeouts.settle_ms);
            driver.settle(contract.timeouts.settle_ms).await;
        }
    }

    debug!("{}", Stage::Capture);
    driver.capture_markup().await
}
