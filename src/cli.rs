//! CLI argument parsing for the haulboard binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "haulboard", about = "Delivery-day capacity board and route estimates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Allocate capacity and estimate routes for every delivery day in a range
    Schedule {
        /// Job file (.json or .csv)
        #[arg(long)]
        jobs: PathBuf,
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last day of the range (YYYY-MM-DD); defaults to the end of that week
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Estimate distance and driving time between two locations
    Distance {
        from: String,
        to: String,
    },
}
