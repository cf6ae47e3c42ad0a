// insiders-core/src/domain/validation/pipeline.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::catalog::{CATALOG, Check};
use super::checks::Workspace;
use super::error::CheckErrorKind;
use super::verdict::Verdict;
use crate::domain::dataset::Dataset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Turns a header mismatch into a failure of `column_names`.
    #[serde(default)]
    pub strict_schema: bool,
}

/// Raw failure detail, kept for operators (logs, JSON report).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    pub check: String,
    pub kind: CheckErrorKind,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CheckFailure>,
    pub checks_passed: Vec<String>,
    /// Rows decoded from the source, when parsing succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_read: Option<usize>,
    /// Rows left after every check, only for admissible datasets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_admitted: Option<usize>,
}

impl ValidationReport {
    pub fn is_admissible(&self) -> bool {
        self.verdict.is_admissible()
    }
}

/// Runs the check catalog over one byte source, stopping at the first failure.
///
/// The pipeline holds no state between runs: every call owns its working
/// dataset and drops it before returning, so concurrent calls never interact.
#[derive(Debug, Clone)]
pub struct ValidationPipeline {
    options: PipelineOptions,
    checks: &'static [Check],
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl ValidationPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            checks: &CATALOG,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn checks(&self) -> &'static [Check] {
        self.checks
    }

    pub fn run(&self, source: &[u8]) -> ValidationReport {
        self.execute(source).0
    }

    /// Same as `run`, but hands back the normalized dataset when admissible.
    pub fn admit(&self, source: &[u8]) -> Result<Dataset, ValidationReport> {
        match self.execute(source) {
            (report, Some(dataset)) if report.is_admissible() => Ok(dataset),
            (report, _) => Err(report),
        }
    }

    #[instrument(skip_all, fields(bytes = source.len(), strict = self.options.strict_schema))]
    fn execute(&self, source: &[u8]) -> (ValidationReport, Option<Dataset>) {
        let mut ws = Workspace::new(source);
        let mut checks_passed = Vec::with_capacity(self.checks.len());
        let mut rows_read = None;

        for check in self.checks {
            if let Err(err) = (check.run)(&mut ws, &self.options) {
                warn!(check = check.name, kind = ?err.kind(), error = %err, "Validation check failed");
                let report = ValidationReport {
                    verdict: Verdict::Inadmissible {
                        check: check.name.to_string(),
                        message: check.message.to_string(),
                    },
                    failure: Some(CheckFailure {
                        check: check.name.to_string(),
                        kind: err.kind(),
                        detail: err.to_string(),
                    }),
                    checks_passed,
                    rows_read,
                    rows_admitted: None,
                };
                return (report, None);
            }

            debug!(check = check.name, "Check passed");
            checks_passed.push(check.name.to_string());
            if rows_read.is_none() {
                rows_read = ws.dataset().map(Dataset::num_rows);
            }
        }

        let dataset = ws.into_dataset();
        let rows_admitted = dataset.as_ref().map(Dataset::num_rows);
        info!(rows_read = ?rows_read, rows_admitted = ?rows_admitted, "Dataset admissible");

        let report = ValidationReport {
            verdict: Verdict::Admissible,
            failure: None,
            checks_passed,
            rows_read,
            rows_admitted,
        };
        (report, dataset)
    }
}
