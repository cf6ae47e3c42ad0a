// insiders/src/commands/job.rs
//
// USE CASE: Weekly job run, invoked by the host scheduler.

use std::path::PathBuf;

use anyhow::Context;
use insiders_core::application::run_and_report;
use insiders_core::infrastructure::adapters::ProcessRunner;
use insiders_core::infrastructure::config::load_project_config;

use super::select_notifier;

pub async fn execute(project_dir: PathBuf, dry_run: bool) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project config from {}",
            project_dir.display()
        )
    })?;
    let Some(job) = config.job.as_ref() else {
        anyhow::bail!(
            "❌ No 'job' section in the project configuration of {}",
            project_dir.display()
        );
    };

    println!("🏃 Running job '{}' for {}", job.command, config.name);
    let notifier = select_notifier(&config, dry_run);
    let report = run_and_report(&ProcessRunner, notifier.as_ref(), job).await?;

    if !report.status.is_success() {
        eprintln!("\n❌ Job {} (report sent via {})", report.status, report.channel);
        std::process::exit(1);
    }
    println!("\n✨ Job {} (report sent via {})", report.status, report.channel);
    Ok(())
}
