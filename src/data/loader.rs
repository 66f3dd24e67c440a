use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 5] = [
    COL_FLIGHT_NUMBER,
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Problems with the shape or content of a launch table.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: String },

    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidOutcome { row: usize, value: f64 },

    #[error("row {row}: column '{column}' expects a whole number, got {value}")]
    NonIntegral {
        row: usize,
        column: String,
        value: f64,
    },

    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the five launch columns, extras ignored
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} ({} sites)",
        dataset.len(),
        path.display(),
        dataset.sites().len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLaunch {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl RawLaunch {
    fn into_record(self, row: usize) -> Result<LaunchRecord, SchemaError> {
        let outcome = Outcome::from_class(self.class).ok_or(SchemaError::InvalidOutcome {
            row,
            value: self.class,
        })?;
        Ok(LaunchRecord {
            flight_number: self.flight_number,
            launch_site: self.launch_site,
            payload_mass_kg: self.payload_mass_kg,
            outcome,
            booster_version_category: self.booster_version_category,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(SchemaError::MissingColumn(col.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunch>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawLaunch> = serde_json::from_str(&text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per launch field.
///
/// Numeric columns may be any of Int32 / Int64 / Float32 / Float64, which
/// covers files written by both Pandas and Polars. `Flight Number` read from
/// a float column must hold whole numbers.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut records)?;
    }

    Ok(LaunchDataset::from_records(records))
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>, SchemaError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| SchemaError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<LaunchRecord>) -> Result<(), SchemaError> {
    let flight = column(batch, COL_FLIGHT_NUMBER)?;
    let site = column(batch, COL_LAUNCH_SITE)?;
    let payload = column(batch, COL_PAYLOAD_MASS)?;
    let class = column(batch, COL_CLASS)?;
    let booster = column(batch, COL_BOOSTER_CATEGORY)?;

    let offset = out.len();
    for row in 0..batch.num_rows() {
        let global_row = offset + row;
        let class_value = extract_f64(class, COL_CLASS, row, global_row)?;
        let outcome = Outcome::from_class(class_value).ok_or(SchemaError::InvalidOutcome {
            row: global_row,
            value: class_value,
        })?;

        out.push(LaunchRecord {
            flight_number: extract_i64(flight, COL_FLIGHT_NUMBER, row, global_row)?,
            launch_site: extract_string(site, COL_LAUNCH_SITE, row, global_row)?,
            payload_mass_kg: extract_f64(payload, COL_PAYLOAD_MASS, row, global_row)?,
            outcome,
            booster_version_category: extract_string(
                booster,
                COL_BOOSTER_CATEGORY,
                row,
                global_row,
            )?,
        });
    }
    Ok(())
}

// -- Arrow helpers --

fn unsupported(col: &Arc<dyn Array>, name: &str) -> SchemaError {
    SchemaError::UnsupportedType {
        column: name.to_string(),
        data_type: format!("{:?}", col.data_type()),
    }
}

fn check_null(col: &Arc<dyn Array>, name: &str, row: usize, global_row: usize) -> Result<(), SchemaError> {
    if col.is_null(row) {
        Err(SchemaError::NullValue {
            row: global_row,
            column: name.to_string(),
        })
    } else {
        Ok(())
    }
}

fn extract_f64(col: &Arc<dyn Array>, name: &str, row: usize, global_row: usize) -> Result<f64, SchemaError> {
    check_null(col, name, row, global_row)?;
    let any = col.as_any();
    match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| f64::from(a.value(row))),
        _ => None,
    }
    .ok_or_else(|| unsupported(col, name))
}

fn extract_i64(col: &Arc<dyn Array>, name: &str, row: usize, global_row: usize) -> Result<i64, SchemaError> {
    check_null(col, name, row, global_row)?;
    let any = col.as_any();
    match col.data_type() {
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row)),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| i64::from(a.value(row))),
        // Pandas stores nullable integer columns as floats.
        DataType::Float64 | DataType::Float32 => {
            let value = extract_f64(col, name, row, global_row)?;
            if value.fract() != 0.0 || !value.is_finite() {
                return Err(SchemaError::NonIntegral {
                    row: global_row,
                    column: name.to_string(),
                    value,
                });
            }
            Some(value as i64)
        }
        _ => None,
    }
    .ok_or_else(|| unsupported(col, name))
}

fn extract_string(col: &Arc<dyn Array>, name: &str, row: usize, global_row: usize) -> Result<String, SchemaError> {
    check_null(col, name, row, global_row)?;
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string())
            .ok_or_else(|| unsupported(col, name)),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(unsupported(col, name)),
    }
}
