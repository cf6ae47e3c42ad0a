// insiders-core/src/domain/validation/verdict.rs

use serde::{Deserialize, Serialize};

/// Binary outcome of one pipeline run. There is no partial acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Admissible,
    Inadmissible {
        /// Name of the first failing check.
        check: String,
        /// Catalog message of that check.
        message: String,
    },
}

impl Verdict {
    pub fn is_admissible(&self) -> bool {
        matches!(self, Self::Admissible)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Admissible => None,
            Self::Inadmissible { message, .. } => Some(message),
        }
    }

    pub fn failed_check(&self) -> Option<&str> {
        match self {
            Self::Admissible => None,
            Self::Inadmissible { check, .. } => Some(check),
        }
    }
}
