mod cli;
mod core;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli::query_cmd::QueryArgs;
use crate::core::config::AppConfig;
use crate::core::dispatcher::{Action, Dispatcher};
use crate::core::explorer::CostExplorerClient;

#[derive(Parser)]
#[command(
    name = "cet",
    about = "Route agent action-group invocations to AWS Cost Explorer",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle an action-group invocation event and print the response envelope
    Invoke {
        /// Event JSON file (reads stdin when omitted)
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
    /// Historical cost and usage
    Usage {
        /// Start date (YYYY-MM-DD), defaults to the first of the month
        #[arg(long = "start")]
        start_date: Option<String>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long = "end")]
        end_date: Option<String>,
        /// Dimension to group by (SERVICE, REGION, INSTANCE_TYPE, ...)
        #[arg(short, long)]
        group_by: Option<String>,
        /// DAILY or MONTHLY
        #[arg(long)]
        granularity: Option<String>,
    },
    /// Forecast future cost
    Forecast {
        /// Start date (YYYY-MM-DD), defaults to tomorrow
        #[arg(long = "start")]
        start_date: Option<String>,
        /// End date (YYYY-MM-DD), defaults to the end of next month
        #[arg(long = "end")]
        end_date: Option<String>,
        /// DAILY or MONTHLY
        #[arg(long)]
        granularity: Option<String>,
    },
    /// Detected cost anomalies
    Anomalies {
        /// Days to look back (default 30)
        #[arg(short, long)]
        lookback_days: Option<u32>,
        /// Anomaly monitor ARN (defaults to the first monitor in the account)
        #[arg(short, long)]
        monitor_arn: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init,
    /// Validate config file
    Check,
    /// Print the config file path
    Path,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn build_dispatcher(config: &AppConfig) -> anyhow::Result<Dispatcher> {
    let client = CostExplorerClient::from_settings(&config.aws)
        .await
        .context("Failed to set up Cost Explorer client")?;
    tracing::debug!(endpoint = client.endpoint(), "Cost Explorer client ready");
    Ok(Dispatcher::new(Arc::new(client), config.dispatch_settings()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default config");
        AppConfig::default()
    });

    let output_opts = cli::output::OutputOptions {
        format: cli::output::resolve_format(
            cli.json,
            cli.format.as_deref(),
            &config.settings.default_format,
        ),
        pretty: cli.pretty,
        use_color: cli::output::detect_color(!cli.no_color, &config.settings.color),
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Init => cli::config_cmd::init(&output_opts)?,
            ConfigAction::Check => cli::config_cmd::check(&output_opts)?,
            ConfigAction::Path => cli::config_cmd::path(&output_opts)?,
        },
        Commands::Invoke { event } => {
            let dispatcher = build_dispatcher(&config).await?;
            cli::invoke_cmd::run(&dispatcher, event.as_deref(), &output_opts).await?;
        }
        Commands::Usage {
            start_date,
            end_date,
            group_by,
            granularity,
        } => {
            let dispatcher = build_dispatcher(&config).await?;
            let args = QueryArgs {
                start_date,
                end_date,
                group_by,
                granularity,
                ..QueryArgs::default()
            };
            cli::query_cmd::run(&dispatcher, Action::CostAndUsage, args, &output_opts).await?;
        }
        Commands::Forecast {
            start_date,
            end_date,
            granularity,
        } => {
            let dispatcher = build_dispatcher(&config).await?;
            let args = QueryArgs {
                start_date,
                end_date,
                granularity,
                ..QueryArgs::default()
            };
            cli::query_cmd::run(&dispatcher, Action::CostForecast, args, &output_opts).await?;
        }
        Commands::Anomalies {
            lookback_days,
            monitor_arn,
        } => {
            let dispatcher = build_dispatcher(&config).await?;
            let args = QueryArgs {
                lookback_days,
                monitor_arn,
                ..QueryArgs::default()
            };
            cli::query_cmd::run(&dispatcher, Action::Anomalies, args, &output_opts).await?;
        }
    }

    Ok(())
}
