use clap::Parser;
use passport_verify::{Contract, Params, PassportInput, Runner};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "passport-verify")]
#[command(about = "Passport authenticity check via the Government24 web form")]
#[command(version)]
struct Cli {
    /// Holder name as printed in the passport
    #[arg(long)]
    name: String,

    /// Passport number
    #[arg(long = "no")]
    passport_no: String,

    /// Issue date YYYYMMDD
    #[arg(long, default_value = "")]
    issue: String,

    /// Expiry date YYYYMMDD
    #[arg(long, default_value = "")]
    expire: String,

    /// Birth date YYYYMMDD
    #[arg(long, default_value = "")]
    birth: String,

    /// Run the browser headless (overrides contract)
    #[arg(long)]
    headless: bool,

    /// Page contract file
    #[arg(long, default_value = "contracts/gov24.yaml")]
    contract: PathBuf,

    /// Set a contract parameter (can be used multiple times)
    #[arg(short = 'P', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Validate the contract without running
    #[arg(long)]
    check: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity. Logs go to stderr; stdout carries
    // only the JSON result.
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        std::process::exit(if e.is_input() { 2 } else { 1 });
    }
}

async fn run(cli: Cli) -> passport_verify::Result<()> {
    let params = Params::from_args(&cli.params)?;
    let mut contract = Contract::load_with_params(&cli.contract, &params)?;

    if cli.check {
        println!("Contract valid: {}", contract.name);
        println!("  Target: {}", contract.page.url);
        println!("  Form: {}", contract.page.form);
        println!("  Marker: {}", contract.result.marker);
        if let Some(ref wait_text) = contract.result.wait_text {
            println!("  Result wait text: {}", wait_text);
        }
        println!("  Deadline: {}s", contract.timeouts.deadline_secs);
        if !contract.params.is_empty() {
            println!("  Parameters: {}", contract.params.len());
            for (name, def) in &contract.params {
                let req = if def.required { " (required)" } else { "" };
                let desc = def.description.as_deref().unwrap_or("");
                println!("    - {}{}: {}", name, req, desc);
            }
        }
        return Ok(());
    }

    // Override headless if specified
    if cli.headless {
        contract.browser.headless = true;
    }

    let input = PassportInput {
        name: cli.name,
        passport_no: cli.passport_no,
        issue_date: cli.issue,
        expire_date: cli.expire,
        birth_date: cli.birth,
    };
    // Reject bad input before any browser session starts
    input.validate()?;

    let mut runner = Runner::new(&contract.browser).await?;
    let outcome = runner.run(&contract, &input).await;

    // Teardown happens regardless of the outcome
    if let Err(e) = runner.close().await {
        tracing::warn!("browser close failed: {}", e);
    }

    let verification = outcome?;
    println!("{}", serde_json::to_string(&verification)?);
    Ok(())
}
