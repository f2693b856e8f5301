//! Haulboard - delivery board capacity and route estimates
//!
//! Reads transport jobs from a file and prints the per-day board as JSON.

mod cli;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use serde_json::json;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haulboard::config::Config;
use haulboard::import::read_jobs;
use haulboard::services::{round_km, DateRange, WeekScheduler};

use cli::{Cli, Command};

fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "haulboard.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Logs go to stderr so stdout stays clean JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,haulboard=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::from_env()?;
    info!("Configuration loaded (depot: {})", config.depot);
    let estimator = config.estimator()?;

    match command {
        Command::Schedule { jobs, from, to } => {
            let range = match to {
                Some(to) => DateRange::new(from, to)?,
                None => DateRange::new(from, DateRange::week_of(from).end())?,
            };
            let all_jobs = read_jobs(&jobs)
                .with_context(|| format!("failed to read jobs from {}", jobs.display()))?;
            let limits = config.calendar().limits_for(&range);

            let board = WeekScheduler::new(&estimator).schedule(
                &all_jobs,
                range,
                &limits,
                &config.depot,
                config.stop_minutes,
            )?;
            let columns: Vec<_> = board.into_values().collect();
            println!("{}", serde_json::to_string_pretty(&columns)?);
        }
        Command::Distance { from, to } => {
            let km = estimator.distance(&from, &to)?;
            let output = json!({
                "from": from,
                "to": to,
                "distanceKm": round_km(km),
                "durationMinutes": estimator.duration(km),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
