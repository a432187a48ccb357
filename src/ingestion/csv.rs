//! CSV ingestion implementation.
//!
//! [`ingest_csv_from_path`] parses a CSV file with a header row into a [`DataSet`], deriving the
//! column types from the data itself (see [`infer_schema`]). Standard CSV quoting is honoured:
//! quoted fields may contain the delimiter and embedded newlines.

use std::io::{Read, Write};
use std::path::Path;

use csv::StringRecord;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Tokens read as missing values by default, matching the usual dataframe loaders.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parsing knobs for CSV ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter (default `,`).
    pub delimiter: u8,
    /// Tokens read as [`Value::Null`] (default [`DEFAULT_NULL_VALUES`]). Empty fields are always
    /// null, even if this list is cleared.
    pub null_values: Vec<String>,
    /// Trim surrounding whitespace from every field (default `false`).
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
            trim: false,
        }
    }
}

impl CsvOptions {
    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(if self.trim { csv::Trim::All } else { csv::Trim::None });
        builder
    }

    fn is_null(&self, raw: &str) -> bool {
        raw.is_empty() || self.null_values.iter().any(|token| token == raw)
    }
}

/// Ingest a CSV file, inferring column types from the values.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, options: &CsvOptions) -> IngestionResult<DataSet> {
    let mut rdr = options.reader_builder().from_path(path)?;
    ingest_csv_from_reader(&mut rdr, options)
}

/// Ingest CSV data from an existing reader, inferring column types from the values.
///
/// The whole input is buffered: inference needs to see every value of a column before the first
/// row can be typed.
pub fn ingest_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    options: &CsvOptions,
) -> IngestionResult<DataSet> {
    let headers = read_headers(rdr)?;
    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
    let schema = infer_schema(&headers, &records, options);

    let rows: Vec<Vec<Value>> = records
        .iter()
        .map(|record| {
            schema
                .fields
                .iter()
                .enumerate()
                .map(|(idx, field)| typed_value(field.data_type, record.get(idx).unwrap_or(""), options))
                .collect()
        })
        .collect();

    tracing::trace!(rows = rows.len(), columns = schema.fields.len(), "inferred csv schema");
    Ok(DataSet::new(schema, rows))
}

/// Infer a schema from header names and raw records.
///
/// A column is [`DataType::Int64`] if every non-null value parses as `i64`, otherwise
/// [`DataType::Float64`] if every value is a decimal or exponent literal, otherwise
/// [`DataType::Bool`] if every value is `true`/`false` (any case), otherwise [`DataType::Utf8`].
/// Columns holding only nulls are `Utf8`.
pub fn infer_schema(headers: &[String], records: &[StringRecord], options: &CsvOptions) -> Schema {
    let fields = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values = records
                .iter()
                .map(|r| r.get(idx).unwrap_or(""))
                .filter(|raw| !options.is_null(raw));
            Field::new(name.clone(), infer_column_type(values))
        })
        .collect();
    Schema::new(fields)
}

fn infer_column_type<'a>(values: impl Iterator<Item = &'a str>) -> DataType {
    let mut int = true;
    let mut float = true;
    let mut boolean = true;
    let mut seen = false;

    for raw in values {
        seen = true;
        let trimmed = raw.trim();
        int = int && trimmed.parse::<i64>().is_ok();
        float = float && parse_float_literal(trimmed).is_some();
        boolean = boolean && parse_bool_literal(trimmed).is_some();
        if !(int || float || boolean) {
            return DataType::Utf8;
        }
    }

    match (seen, int, float, boolean) {
        (false, ..) => DataType::Utf8,
        (true, true, ..) => DataType::Int64,
        (true, false, true, _) => DataType::Float64,
        (true, false, false, true) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

/// Parse a plain decimal/exponent literal (`1`, `-2.5`, `.5`, `1e-3`).
///
/// Words such as `inf` or `NaN` are rejected even though `f64::from_str` accepts them.
fn parse_float_literal(s: &str) -> Option<f64> {
    let digits = s.trim_start_matches(['+', '-']);
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if !s.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_bool_literal(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Convert one raw field to the column's inferred type.
///
/// Inference only picks a type every non-null value of the column parses as, so only `Utf8`
/// columns reach the text fallback.
fn typed_value(data_type: DataType, raw: &str, options: &CsvOptions) -> Value {
    if options.is_null(raw) {
        return Value::Null;
    }

    let trimmed = raw.trim();
    let parsed = match data_type {
        DataType::Utf8 => None,
        DataType::Int64 => trimmed.parse::<i64>().ok().map(Value::Int64),
        DataType::Float64 => parse_float_literal(trimmed).map(Value::Float64),
        DataType::Bool => parse_bool_literal(trimmed).map(Value::Bool),
    };
    parsed.unwrap_or_else(|| Value::Utf8(raw.to_owned()))
}

/// Write a dataset as CSV (header row first). [`Value::Null`] is written as an empty field.
pub fn write_csv_to_writer<W: Write>(dataset: &DataSet, writer: W) -> IngestionResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a dataset to a CSV file at `path`, replacing any existing file.
pub fn write_csv_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> IngestionResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv_to_writer(dataset, file)
}

/// Read the header row, renaming duplicates to `name.1`, `name.2`, ... so column names stay
/// unique.
fn read_headers<R: Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<Vec<String>> {
    let raw = rdr.headers()?;
    if raw.is_empty() {
        return Err(IngestionError::MissingHeader);
    }

    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw.iter() {
        let mut candidate = name.to_owned();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        names.push(candidate);
    }
    Ok(names)
}
