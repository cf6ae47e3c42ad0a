// insiders-core/src/domain/validation/checks.rs

use std::sync::Arc;

use datafusion::arrow::array::{ArrayRef, StringArray};
use tracing::{debug, warn};

use super::error::CheckError;
use super::pipeline::PipelineOptions;
use crate::domain::dataset::schema::{
    CANCELLATION_MARKER, CUSTOMER_ID, INVOICE_DATE, INVOICE_NO, QUANTITY, UNIT_PRICE,
    to_snake_case,
};
use crate::domain::dataset::{Dataset, ExpectedSchema, SemanticType, coercion, read_csv};

/// State threaded through the checks of one pipeline run.
pub struct Workspace<'a> {
    source: &'a [u8],
    dataset: Option<Dataset>,
}

impl<'a> Workspace<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            dataset: None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn into_dataset(self) -> Option<Dataset> {
        self.dataset
    }

    fn loaded(&mut self) -> Result<&mut Dataset, CheckError> {
        self.dataset
            .as_mut()
            .ok_or_else(|| CheckError::Parse("dataset has not been loaded".to_string()))
    }
}

// Trailing delimiters leave a column with a blank header behind.
fn is_unnamed(name: &str) -> bool {
    name.trim().is_empty()
}

fn require_column(dataset: &Dataset, name: &str) -> Result<ArrayRef, CheckError> {
    dataset
        .column(name)
        .cloned()
        .ok_or_else(|| CheckError::missing_column(name))
}

fn coerce(dataset: &mut Dataset, name: &str, target: SemanticType) -> Result<(), CheckError> {
    let column = require_column(dataset, name)?;
    let coerced = coercion::coerce_array(name, &column, target)?;
    dataset.replace_column(name, coerced)?;
    Ok(())
}

fn coerce_required(dataset: &mut Dataset, name: &str, target: SemanticType) -> Result<(), CheckError> {
    let column = require_column(dataset, name)?;
    let coerced = coercion::coerce_required(name, &column, target)?;
    dataset.replace_column(name, coerced)?;
    Ok(())
}

// --- CHECKS (catalog order) ---

pub fn convert_csv(ws: &mut Workspace<'_>, _: &PipelineOptions) -> Result<(), CheckError> {
    let mut dataset = read_csv(ws.source)?;

    let dropped = dataset.drop_columns_where(is_unnamed)?;
    if !dropped.is_empty() {
        debug!(count = dropped.len(), "Dropped unnamed columns");
    }

    ws.dataset = Some(dataset);
    Ok(())
}

pub fn column_names(ws: &mut Workspace<'_>, options: &PipelineOptions) -> Result<(), CheckError> {
    let diff = ExpectedSchema::compare(&ws.loaded()?.column_names());
    if diff.is_match() {
        return Ok(());
    }

    // Whether drift is fatal is undecided upstream: uploads with extra or
    // renamed headers used to pass this step. `strict_schema` opts in.
    if options.strict_schema {
        return Err(CheckError::SchemaMismatch(diff.to_string()));
    }
    warn!(missing = ?diff.missing, unexpected = ?diff.unexpected, "Column names differ from the expected schema");
    Ok(())
}

pub fn change_columns_case(ws: &mut Workspace<'_>, _: &PipelineOptions) -> Result<(), CheckError> {
    ws.loaded()?.rename_columns(to_snake_case)?;
    Ok(())
}

pub fn customer_id(ws: &mut Workspace<'_>, _: &PipelineOptions) -> Result<(), CheckError> {
    let dataset = ws.loaded()?;
    require_column(dataset, CUSTOMER_ID)?;

    let removed = dataset.drop_null_rows(CUSTOMER_ID)?;
    if removed > 0 {
        debug!(removed, "Dropped rows without customer id");
    }

    coerce_required(dataset, CUSTOMER_ID, SemanticType::Integer)
}

pub fn quantity(ws: &mut Workspace<'_>, _: &PipelineOptions) -> Result<(), CheckError> {
    coerce_required(ws.loaded()?, QUANTITY, SemanticType::Integer)
}

pub fn unit_price(ws: &mut Workspace<'_>, _: &PipelineOptions) -> Result<(), CheckError> {
    coerce(ws.loaded()?, UNIT_PRICE, SemanticType::Float)
}

pub fn invoice_date(ws: &mut Workspace<'_>, _: &PipelineOptions) -> Result<(), CheckError> {
    coerce(ws.loaded()?, INVOICE_DATE, SemanticType::Date)
}

pub fn invoice_no(ws: &mut Workspace<'_>, _: &PipelineOptions) -> Result<(), CheckError> {
    let dataset = ws.loaded()?;
    let column = require_column(dataset, INVOICE_NO)?;

    // Only a text column can carry the marker; an already typed column skips the strip.
    if let Some(text) = column.as_any().downcast_ref::<StringArray>() {
        let stripped: StringArray = text
            .iter()
            .map(|v| v.map(|s| s.replace(CANCELLATION_MARKER, "")))
            .collect();
        dataset.replace_column(INVOICE_NO, Arc::new(stripped))?;
    }

    coerce_required(dataset, INVOICE_NO, SemanticType::Integer)
}
