// insiders/src/commands/validate.rs
//
// USE CASE: Gate one uploaded CSV file before it reaches the model.

use std::path::PathBuf;

use anyhow::Context;
use insiders_core::application::{VerdictReporter, validate_file};
use insiders_core::domain::validation::PipelineOptions;
use insiders_core::infrastructure::config::load_project_config;
use insiders_core::infrastructure::fs::write_json;

pub fn execute(
    input: PathBuf,
    project_dir: PathBuf,
    strict: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project config from {}",
            project_dir.display()
        )
    })?;
    let mut options = PipelineOptions::from(config.validation);
    if strict {
        options.strict_schema = true;
    }

    let report = validate_file(&input, options)?;

    if let Some(path) = output {
        write_json(&path, &report)?;
        tracing::info!(path = %path.display(), "Validation report written");
    }

    let message = VerdictReporter::render(&report.verdict);
    println!("{}", message.text());

    if !report.is_admissible() {
        // Exit with error code so upload hooks can refuse the file
        std::process::exit(1);
    }
    Ok(())
}
