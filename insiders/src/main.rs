// insiders/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug insiders validate ... to see every check.
    // Logs go to stderr so stdout only carries the verdict.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            input,
            project_dir,
            strict,
            output,
        } => commands::validate::execute(input, project_dir, strict, output)?,
        Commands::Schema => commands::schema::execute(),
        Commands::Job {
            project_dir,
            dry_run,
        } => commands::job::execute(project_dir, dry_run).await?,
        Commands::Report {
            project_dir,
            exit_code,
            dry_run,
        } => commands::report::execute(project_dir, exit_code, dry_run).await?,
    }

    Ok(())
}
