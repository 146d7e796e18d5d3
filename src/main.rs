mod fetch;
mod jsend;
mod serve;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Datelike;
use clap::{Parser, Subcommand};

use md_lineup::{parse_running_order, FESTIVAL_TZ};

use crate::fetch::RUNNING_ORDER_URL;
use crate::jsend::Jsend;

#[derive(Parser)]
#[command(name = "md_lineup", about = "MetalDays running order as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the running order and dump it as a JSend document to stdout
    Dump {
        /// URL of the running order page
        #[arg(long, default_value = RUNNING_ORDER_URL)]
        url: String,
        /// Parse a local HTML file instead of fetching
        #[arg(long)]
        file: Option<PathBuf>,
        /// Year the festival takes place in (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve the running order as JSON over HTTP
    Serve {
        /// URL of the running order page
        #[arg(long, default_value = RUNNING_ORDER_URL)]
        url: String,
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: SocketAddr,
        /// Year the festival takes place in (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Answer with a permissive Access-Control-Allow-Origin header
        #[arg(long)]
        cors: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            url,
            file,
            year,
            pretty,
        } => {
            let year = year.unwrap_or_else(current_year);

            let (status, body) = match file {
                Some(path) => {
                    let html = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    match parse_running_order(year, FESTIVAL_TZ, &html).await {
                        Ok(running_order) => (200, Jsend::success(running_order)),
                        Err(e) => (500, Jsend::error(e.to_string(), 500)),
                    }
                }
                None => jsend::running_order_response(&url, year).await,
            };

            let out = if pretty {
                serde_json::to_string_pretty(&body)?
            } else {
                serde_json::to_string(&body)?
            };
            println!("{}", out);

            // The envelope is written either way; a failed extraction still
            // exits non-zero for scripting.
            if status != 200 {
                anyhow::bail!(
                    "{}",
                    body.message
                        .unwrap_or_else(|| "running order extraction failed".to_string())
                );
            }
            Ok(())
        }
        Commands::Serve {
            url,
            listen,
            year,
            cors,
        } => {
            let year = year.unwrap_or_else(current_year);
            serve::serve(listen, url, year, cors).await
        }
    }
}

/// The current year in the festival timezone.
fn current_year() -> i32 {
    chrono::Utc::now().with_timezone(&FESTIVAL_TZ).year()
}
