// insiders-core/src/domain/dataset/reader.rs

use std::io::Cursor;
use std::sync::Arc;

use datafusion::arrow::compute::concat_batches;
use datafusion::arrow::csv::ReaderBuilder;
use datafusion::arrow::csv::reader::Format;
use datafusion::arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use datafusion::arrow::error::ArrowError;
use regex::Regex;
use tracing::debug;

use super::frame::Dataset;

/// Rows decoded per Arrow batch. Batches are concatenated once parsing ends.
const BATCH_SIZE: usize = 8192;

/// Cells read as missing: the empty cell plus the pandas default NA tokens.
/// Matching is exact, without trimming.
pub const NA_PATTERN: &str = r"^(?:|#N/A|#N/A N/A|#NA|-1\.#IND|-1\.#QNAN|-NaN|-nan|1\.#IND|1\.#QNAN|<NA>|N/A|NA|NULL|NaN|None|n/a|nan|null)$";

/// Decodes ISO-8859-1 bytes. Each byte is the code point of the same value,
/// so this never fails, unlike strict UTF-8.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parses comma-separated Latin-1 bytes with a header row.
///
/// No type inference happens: every column comes out as nullable `Utf8`, and
/// empty cells or NA tokens (`NaN`, `N/A`, `null`, ...) are null. Rows shorter than the header are padded with nulls;
/// rows wider than the header are a parse error.
pub fn read_csv(bytes: &[u8]) -> Result<Dataset, ArrowError> {
    let text = decode_latin1(bytes);

    let format = Format::default().with_header(true);
    let (header, _) = format.infer_schema(Cursor::new(text.as_bytes()), Some(0))?;
    if header.fields().is_empty() {
        return Err(ArrowError::CsvError(
            "No columns to parse from input".to_string(),
        ));
    }

    let schema: SchemaRef = Arc::new(Schema::new(
        header
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .with_truncated_rows(true)
        .with_null_regex(na_regex()?)
        .build(Cursor::new(text.as_bytes()))?;

    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;
    debug!(
        columns = batch.num_columns(),
        rows = batch.num_rows(),
        batches = batches.len(),
        "CSV decoded"
    );

    Ok(Dataset::new(batch))
}

fn na_regex() -> Result<Regex, ArrowError> {
    Regex::new(NA_PATTERN).map_err(|e| ArrowError::CsvError(e.to_string()))
}
