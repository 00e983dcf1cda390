//! Parquet encoding of report tables.

use std::fs::File;
use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch, StringArray, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use tracing::debug;

use super::{OutputError, Table, Values};

/// Writes `table` as a single record batch with non-nullable `Utf8` and
/// `UInt64` columns.
pub(super) fn write_table(table: &Table, file: File) -> Result<(), OutputError> {
    let batch = to_record_batch(table)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    debug!(rows = batch.num_rows(), "parquet report written");
    Ok(())
}

pub(super) fn to_record_batch(table: &Table) -> Result<RecordBatch, OutputError> {
    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = table
        .columns
        .iter()
        .map(|column| match &column.values {
            Values::Text(values) => (
                Field::new(column.name, DataType::Utf8, false),
                Arc::new(StringArray::from_iter_values(values)) as ArrayRef,
            ),
            Values::Count(values) => (
                Field::new(column.name, DataType::UInt64, false),
                Arc::new(UInt64Array::from_iter_values(values.iter().copied())) as ArrayRef,
            ),
        })
        .unzip();
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}
