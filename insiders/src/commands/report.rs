// insiders/src/commands/report.rs
//
// USE CASE: Report on a run that was started by something else.

use std::path::PathBuf;

use anyhow::Context;
use insiders_core::application::report_latest;
use insiders_core::infrastructure::config::load_project_config;

use super::select_notifier;

pub async fn execute(
    project_dir: PathBuf,
    exit_code: Option<i32>,
    dry_run: bool,
) -> anyhow::Result<()> {
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

    let notifier = select_notifier(&config, dry_run);
    let report = report_latest(notifier.as_ref(), job, exit_code).await?;
    println!("📨 {} (via {})", report.notification.subject, report.channel);
    Ok(())
}
