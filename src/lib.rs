//! # passport-verify
//!
//! Drives the Government24 passport authenticity form in a real browser,
//! captures the result page, and reports whether the verdict marker is
//! present. The page contract (URL, selectors, marker) is provisional and
//! lives in a YAML file, not in code.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use passport_verify::{Contract, PassportInput, Runner};
//!
//! # #[tokio::main]
//! # async fn main() -> passport_verify::Result<()> {
//! let contract = Contract::load("contracts/gov24.yaml")?;
//! let input = PassportInput::new("홍길동", "M12345678");
//! let mut runner = Runner::new(&contract.browser).await?;
//! let verification = runner.run(&contract, &input).await?;
//! println!("match: {}", verification.matched);
//! runner.close().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod input;
mod runner;
pub mod verdict;

pub use config::{
    BrowserConfig, Contract, FieldSelectors, OnFailure, PageContract, ParamDef, Params,
    ResultContract, Timeouts, Viewport,
};
pub use input::PassportInput;
pub use runner::{verify, FormDriver, PageDriver, Runner, Stage};
pub use verdict::Verification;

/// Result type for passport-verify operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during contract loading or a verification run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input error: {0}")]
    Input(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    #[error("navigation timeout: {0}")]
    NavigationTimeout(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("deadline exceeded after {0}s")]
    Deadline(u64),
}

impl Error {
    /// True for errors reported before any browser session starts.
    pub fn is_input(&self) -> bool {
        matches!(self, Error::Input(_))
    }
}
