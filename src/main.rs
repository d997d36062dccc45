//! `sloth`: command-line access to the Sloth API for manual checks.
//!
//! Reads `SLOTH_API_KEY`, `SLOTH_BASE_URL` and `SLOTH_TIMEOUT_SECS` from the
//! environment (or a `.env` file) and prints the result envelope as JSON.

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sloth_api_client::{
    ApiResult, CreateTransactionViewModel, SlothApiClient, SlothApiClientOptions,
    TransactionClient,
};

/// Used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info,sloth_api_client=debug";

const USAGE: &str = "\
Usage: sloth <command> [argument]

Commands:
  top                 Fetch the most recent transaction
  get <id>            Fetch a transaction by id
  processor <id>      Fetch a transaction by processor tracking number
  kfs <key>           Fetch transactions by KFS tracking number
  validate <coa>      Validate a chart-of-accounts string
  create <file.json>  Create a transaction from a JSON payload";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = env::var("LOG_FORMAT").is_ok_and(|v| v == "json");
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_result<T: Serialize>(result: &ApiResult<T>) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(if result.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn argument(args: &[String], command: &str) -> Result<String> {
    match args.get(2) {
        Some(value) => Ok(value.clone()),
        None => bail!("'{}' needs an argument\n\n{}", command, USAGE),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(64));
    };

    let options = SlothApiClientOptions::from_env().context("Invalid Sloth configuration")?;
    info!(base_url = %options.base_url, "Using Sloth API");
    let client = SlothApiClient::new(options)?;

    match command {
        "top" => print_result(&client.get_top1_transactions().await?),
        "get" => {
            let id = argument(&args, command)?;
            print_result(&client.get_transaction_by_id(&id).await?)
        }
        "processor" => {
            let id = argument(&args, command)?;
            print_result(&client.get_transaction_by_processor_id(&id).await?)
        }
        "kfs" => {
            let key = argument(&args, command)?;
            print_result(&client.get_transactions_by_kfs_tracking_number(&key).await?)
        }
        "validate" => {
            let coa = argument(&args, command)?;
            print_result(&client.validate_chart_of_accounts(&coa).await?)
        }
        "create" => {
            let path = argument(&args, command)?;
            let payload = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path))?;
            let model: CreateTransactionViewModel =
                serde_json::from_str(&payload).context("Payload is not a valid transaction")?;
            if !model.is_balanced() {
                info!("Debits and credits do not balance; the service will decide");
            }
            print_result(&client.create_transaction(&model).await?)
        }
        other => bail!("Unknown command '{}'\n\n{}", other, USAGE),
    }
}
