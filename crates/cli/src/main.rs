//! mqini CLI - Queue manager configuration discovery
//! Composition root: wires SubprocessRunner into QueueManagerLookup

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tabled::{Table, Tabled};
use tokio::io::AsyncReadExt;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mqini_core::application::constants::DSPMQINF_COMMAND;
use mqini_core::application::{LookupConfig, QueueManagerLookup};
use mqini_core::domain::{parse_queue_manager_stanza, QueueManagerRecord};
use mqini_infra_system::SubprocessRunner;

const DEFAULT_LOG_FILTER: &str = "mqini=warn";

#[derive(Parser)]
#[command(name = "mqini")]
#[command(about = "Queue manager configuration discovery", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Program that displays queue manager configuration
    #[arg(long, global = true, env = "MQINI_DSPMQINF", default_value = DSPMQINF_COMMAND)]
    dspmqinf: String,

    /// Give up on the query after this many milliseconds (default: wait)
    #[arg(long, global = true, env = "MQINI_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Log output format
    #[arg(long, global = true, env = "MQINI_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a queue manager's configuration
    Show {
        /// Queue manager name
        name: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the directory holding a queue manager's error logs
    ErrorsDir {
        /// Queue manager name
        name: String,
    },

    /// Parse stanza text from a file (or stdin) without running dspmqinf
    Parse {
        /// Stanza file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    // Logs go to stderr so stdout only carries results
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn build_lookup(cli: &Cli) -> Result<QueueManagerLookup> {
    let command = shellexpand::tilde(&cli.dspmqinf).into_owned();
    let config = LookupConfig::new(command);
    config.validate()?;

    let runner = match cli.timeout_ms {
        Some(ms) => SubprocessRunner::with_timeout(Duration::from_millis(ms)),
        None => SubprocessRunner::new(),
    };

    debug!(command = %config.command, timeout_ms = ?cli.timeout_ms, "Lookup configured");

    Ok(QueueManagerLookup::new(Arc::new(runner), config))
}

fn record_rows(qm: &QueueManagerRecord) -> Vec<FieldRow> {
    vec![
        FieldRow {
            field: "Name",
            value: qm.name.clone(),
        },
        FieldRow {
            field: "Prefix",
            value: qm.prefix.clone(),
        },
        FieldRow {
            field: "Directory",
            value: qm.directory.clone(),
        },
        FieldRow {
            field: "DataPath",
            value: qm.data_path.clone(),
        },
        FieldRow {
            field: "InstallationName",
            value: qm.installation_name.clone(),
        },
        FieldRow {
            field: "ErrorLogDirectory",
            value: qm.error_log_directory().display().to_string(),
        },
    ]
}

fn print_record(qm: &QueueManagerRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(qm)?);
        return Ok(());
    }

    let title = if qm.name.is_empty() {
        "Queue manager".to_string()
    } else {
        format!("Queue manager {}", qm.name)
    };
    println!("{}", title.cyan().bold());
    println!("{}", Table::new(record_rows(qm)));

    Ok(())
}

async fn read_stanza(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read stanza file {}", path.display())),
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("Failed to read stanza from stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_format)?;

    match &cli.command {
        Commands::Show { name, json } => {
            let lookup = build_lookup(&cli)?;
            let qm = lookup
                .get_queue_manager(name)
                .await
                .with_context(|| format!("Failed to look up queue manager {}", name))?;

            print_record(&qm, *json)?;
        }

        Commands::ErrorsDir { name } => {
            let lookup = build_lookup(&cli)?;
            let dir = lookup
                .error_log_directory(name)
                .await
                .with_context(|| format!("Failed to look up queue manager {}", name))?;

            println!("{}", dir.display());
        }

        Commands::Parse { file, json } => {
            let stanza = read_stanza(file.as_ref()).await?;
            let qm = parse_queue_manager_stanza(&stanza).context("Failed to parse stanza")?;

            print_record(&qm, *json)?;
        }
    }

    Ok(())
}
