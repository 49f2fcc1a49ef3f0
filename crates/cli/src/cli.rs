use std::path::PathBuf;

use anyhow::{Context, Result};
use calsift_domain::{AvailabilityQuery, ClientMeetingQuery};
use calsift_infra::{build_resolver, config, observability, EngineConfig};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

#[derive(Subcommand, Debug)]
enum Command {
    /// Print busy intervals across the configured calendars
    Busy {
        /// Range start (RFC 3339)
        #[arg(long)]
        from: String,
        /// Range end, exclusive (RFC 3339)
        #[arg(long)]
        to: String,
        /// Override the maximum provider window, in days
        #[arg(long)]
        max_window_days: Option<f64>,
    },
    /// Print meetings with one client, plus the remaining busy time
    ClientMeetings {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Client contact the meetings are attributed to
        #[arg(long)]
        client_email: String,
        /// Advisor address, used when the provider does not flag `self`
        #[arg(long)]
        advisor_email: Option<String>,
        #[arg(long)]
        max_window_days: Option<f64>,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Read configuration from this JSON or TOML file instead of the
    /// environment
    #[arg(long, global = true, env = "CALSIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    observability::init_tracing(args.json_logs)?;

    let engine = load_config(args.config)?;
    let resolver = build_resolver(&engine)?;

    match args.command {
        Command::Busy { from, to, max_window_days } => {
            let mut query = AvailabilityQuery::new(engine.oauth.clone(), from, to);
            query.max_window_days = max_window_days;

            let intervals = resolver
                .resolve_busy_intervals(&query)
                .await
                .context("failed to resolve busy intervals")?;
            info!(count = intervals.len(), "busy intervals resolved");
            print_json(&intervals)?;
        }
        Command::ClientMeetings { from, to, client_email, advisor_email, max_window_days } => {
            let mut query = ClientMeetingQuery::new(engine.oauth.clone(), from, to, client_email);
            query.advisor_email_hint = advisor_email;
            query.max_window_days = max_window_days;

            let result = resolver
                .resolve_client_meetings(&query)
                .await
                .context("failed to resolve client meetings")?;
            info!(
                client_meetings = result.client_meetings.len(),
                busy = result.non_client_busy_intervals.len(),
                "client meetings resolved"
            );
            print_json(&result)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<EngineConfig> {
    let loaded = match path {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    };
    loaded.context("failed to load CalSift configuration")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
