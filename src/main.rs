use clap::Parser;
use lambda_prune::app::{self, AppConfig};
use lambda_prune::platform::LambdaConfig;
use std::path::PathBuf;
use tracing::debug;

/// Delete old published versions of Lambda functions
#[derive(Parser)]
#[command(name = "lambda-prune", version)]
#[command(about = "Delete old Lambda function versions, keeping the newest of each", long_about = None)]
struct Cli {
    /// Path to the configuration file listing the functions
    #[arg(short = 'c', long)]
    config: PathBuf,

    /// Number of newest versions to keep per function
    #[arg(short = 'k', long, default_value = "5")]
    keep: usize,

    /// Maximum number of functions processed at once (1 = sequential)
    #[arg(short = 'j', long, default_value = "10")]
    concurrency: usize,

    /// Only process these function keys (repeatable)
    #[arg(short = 'f', long = "function", value_name = "KEY")]
    functions: Vec<String>,

    /// AWS region, overriding the environment
    #[arg(long)]
    region: Option<String>,

    /// AWS shared config profile
    #[arg(long)]
    profile: Option<String>,

    /// Custom Lambda endpoint, e.g. a local emulator
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        AppConfig::new(cli.config)
            .with_verbose(cli.verbose)
            .with_keep(cli.keep)
            .with_concurrency(cli.concurrency)
            .with_functions(cli.functions)
            .with_lambda(LambdaConfig {
                region: cli.region,
                profile: cli.profile,
                endpoint_url: cli.endpoint_url,
            })
    }
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from(Cli::parse());
    app::init_logging(&config);

    match app::run(&config).await {
        Ok(summary) => {
            debug!(
                "Run finished with {} error(s)",
                summary.list_failures() + summary.deletion_failures() + summary.aborted_functions()
            );
        }
        Err(e) => app::handle_fatal_error(e, config.verbose),
    }
}
