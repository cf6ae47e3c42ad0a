// insiders-core/src/domain/dataset/frame.rs

use std::sync::Arc;

use datafusion::arrow::array::{Array, ArrayRef};
use datafusion::arrow::compute::{filter_record_batch, is_not_null};
use datafusion::arrow::datatypes::{DataType, Field, FieldRef, Schema};
use datafusion::arrow::error::ArrowError;
use datafusion::arrow::record_batch::RecordBatch;

/// Tabular working copy under validation.
///
/// Every mutation rebuilds the underlying `RecordBatch`; column buffers are
/// reference counted so untouched columns are shared, not copied.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
}

impl Dataset {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    pub fn data_type(&self, name: &str) -> Option<DataType> {
        self.column(name).map(|c| c.data_type().clone())
    }

    /// Removes every column whose name matches `predicate`, returning the dropped names.
    pub fn drop_columns_where<F>(&mut self, predicate: F) -> Result<Vec<String>, ArrowError>
    where
        F: Fn(&str) -> bool,
    {
        let schema = self.batch.schema();
        let (dropped, kept): (Vec<_>, Vec<_>) = schema
            .fields()
            .iter()
            .enumerate()
            .partition(|(_, f)| predicate(f.name()));

        if dropped.is_empty() {
            return Ok(Vec::new());
        }

        let indices: Vec<usize> = kept.iter().map(|(i, _)| *i).collect();
        self.batch = self.batch.project(&indices)?;

        Ok(dropped.into_iter().map(|(_, f)| f.name().clone()).collect())
    }

    pub fn rename_columns<F>(&mut self, rename: F) -> Result<(), ArrowError>
    where
        F: Fn(&str) -> String,
    {
        let fields: Vec<FieldRef> = self
            .batch
            .schema()
            .fields()
            .iter()
            .map(|f| Arc::new(f.as_ref().clone().with_name(rename(f.name()))))
            .collect();

        self.rebuild(fields, self.batch.columns().to_vec())
    }

    /// Drops rows where `name` is null. Returns how many rows were removed.
    /// A missing column removes nothing.
    pub fn drop_null_rows(&mut self, name: &str) -> Result<usize, ArrowError> {
        let Some(column) = self.column(name) else {
            return Ok(0);
        };
        if column.null_count() == 0 {
            return Ok(0);
        }

        let mask = is_not_null(column.as_ref())?;
        let before = self.batch.num_rows();
        self.batch = filter_record_batch(&self.batch, &mask)?;

        Ok(before - self.batch.num_rows())
    }

    /// Swaps the values of `name` for `values`, adopting the new array's type.
    pub fn replace_column(&mut self, name: &str, values: ArrayRef) -> Result<(), ArrowError> {
        let schema = self.batch.schema();
        let (index, _) = schema
            .column_with_name(name)
            .ok_or_else(|| ArrowError::SchemaError(format!("Column '{}' not found", name)))?;

        let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
        fields[index] = Arc::new(Field::new(name, values.data_type().clone(), true));

        let mut columns = self.batch.columns().to_vec();
        columns[index] = values;

        self.rebuild(fields, columns)
    }

    fn rebuild(&mut self, fields: Vec<FieldRef>, columns: Vec<ArrayRef>) -> Result<(), ArrowError> {
        let schema = Arc::new(Schema::new(fields));
        self.batch = RecordBatch::try_new(schema, columns)?;
        Ok(())
    }
}
