// insiders-core/src/domain/validation/error.rs

use datafusion::arrow::error::ArrowError;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::dataset::{CoercionError, SemanticType};

/// Why a single check rejected the dataset. The text is operator detail:
/// end users only ever see the check's catalog message.
#[derive(Error, Debug, Diagnostic)]
pub enum CheckError {
    #[error("Parse Error: {0}")]
    #[diagnostic(
        code(insiders::validation::parse),
        help("The input is not valid comma-separated text, or a value does not match its required format.")
    )]
    Parse(String),

    #[error("Type Error: {0}")]
    #[diagnostic(
        code(insiders::validation::type_error),
        help("A value cannot be converted to the column's numeric type.")
    )]
    Type(String),

    #[error("Schema Mismatch: {0}")]
    #[diagnostic(
        code(insiders::validation::schema),
        help("Headers must be: InvoiceNo, StockCode, Description, Quantity, InvoiceDate, UnitPrice, CustomerID, Country.")
    )]
    SchemaMismatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckErrorKind {
    Parse,
    Type,
    SchemaMismatch,
}

impl CheckError {
    pub fn kind(&self) -> CheckErrorKind {
        match self {
            Self::Parse(_) => CheckErrorKind::Parse,
            Self::Type(_) => CheckErrorKind::Type,
            Self::SchemaMismatch(_) => CheckErrorKind::SchemaMismatch,
        }
    }

    pub fn missing_column(name: &str) -> Self {
        Self::SchemaMismatch(format!("column '{}' not found", name))
    }
}

impl From<ArrowError> for CheckError {
    fn from(err: ArrowError) -> Self {
        CheckError::Parse(err.to_string())
    }
}

// Dates are a format problem, numbers a type problem.
impl From<CoercionError> for CheckError {
    fn from(err: CoercionError) -> Self {
        match err.target() {
            SemanticType::Date => CheckError::Parse(err.to_string()),
            _ => CheckError::Type(err.to_string()),
        }
    }
}
