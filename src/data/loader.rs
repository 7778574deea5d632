use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, Row};

/// Structural problems with an input file (I/O and parse errors go through
/// `anyhow` context instead).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("CSV file has no header row")]
    MissingHeader,
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("record {0} is not a JSON object")]
    NotAnObject(usize),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (`,` `;` or tab separated)
/// * `.json`    – `[{ "Country": "France", "AI Adoption Rate (%)": 41.5, ... }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "tsv" | "txt" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} rows with {} columns from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one row per record.
/// Every cell is kept as its raw text; numbers are read later by
/// `parse_numeric`, and grouping compares the text exactly.
fn load_csv(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path).context("opening CSV")?;
    parse_csv(&content)
}

/// Parse CSV text into a dataset.
pub fn parse_csv(content: &str) -> Result<Dataset> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(content))
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader.into());
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let cells: BTreeMap<String, CellValue> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let value = record.get(idx).map_or(CellValue::Null, CellValue::from);
                (name.clone(), value)
            })
            .collect();
        rows.push(Row::new(cells));
    }

    Ok(Dataset::new(rows, headers))
}

/// Pick the delimiter that splits the header line into the most fields.
/// Ties go to `,`.
fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    let mut best = b',';
    let mut best_count = field_count(header, b',');
    for delim in [b';', b'\t'] {
        let count = field_count(header, delim);
        if count > best_count {
            best = delim;
            best_count = count;
        }
    }
    best
}

fn field_count(line: &str, delim: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Country": "France", "Industry": "Media", "AI Adoption Rate (%)": "41.5%" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse records-oriented JSON text into a dataset.
pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut column_names: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(LoadError::NotAnObject(i))?;

        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            cells.insert(key.clone(), json_to_cell(val));
        }
        rows.push(Row::new(cells));
    }

    Ok(Dataset::new(rows, column_names))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per dataset field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let cells: BTreeMap<String, CellValue> = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(col_idx, field)| (field.name().clone(), extract_cell(batch.column(col_idx), row)))
                .collect();
            rows.push(Row::new(cells));
        }
    }

    Ok(Dataset::new(rows, column_names))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(CellValue::Null, |a| CellValue::Bool(a.value(row))),
        other => CellValue::String(format!("{other:?}")),
    }
}
