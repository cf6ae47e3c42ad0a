// insiders-core/src/application/reporter.rs

use serde::Serialize;

use crate::domain::validation::Verdict;

const ACKNOWLEDGMENT: &str = "Well done!\n\
    The uploaded csv file was approved by the data validator.\n\
    Thanks for helping our model make accurate predictions.";

const REJECTION_HEADLINE: &str = "Once the data validator indicates an error, \
    the uploaded csv file can't be sent to our machine learning model.";

const CONTACT_FALLBACK: &str = "If you already checked the uploaded csv file and found no error, \
    please contact the administrator for further information.";

/// One of the two states shown to the person uploading the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum UserMessage {
    Success(String),
    Error(String),
}

impl UserMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

pub struct VerdictReporter;

impl VerdictReporter {
    /// Only the catalog message of the failed check reaches the user, never the raw error.
    pub fn render(verdict: &Verdict) -> UserMessage {
        match verdict {
            Verdict::Admissible => UserMessage::Success(ACKNOWLEDGMENT.to_string()),
            Verdict::Inadmissible { message, .. } => UserMessage::Error(format!(
                "{}\n{} and try again...\n{}",
                REJECTION_HEADLINE, message, CONTACT_FALLBACK
            )),
        }
    }
}
