// insiders/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "insiders")]
#[command(about = "Admissibility gate for e-commerce transaction uploads", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ✅ Validates an uploaded CSV file (use '-' for stdin)
    Validate {
        /// CSV file to validate
        input: PathBuf,

        /// Project directory (holds insiders.yaml)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Reject files whose header differs from the expected schema
        #[arg(long)]
        strict: bool,

        /// Write the full validation report as JSON
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// 📋 Shows the expected schema and a sample dataset
    Schema,

    /// 🏃 Runs the configured job, then mails its latest log
    Job {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Print the report instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// 📨 Sends the report for the latest log without running the job
    Report {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Exit code of the run being reported (required in exit_code mode)
        #[arg(long, allow_hyphen_values = true)]
        exit_code: Option<i32>,

        /// Print the report instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}
