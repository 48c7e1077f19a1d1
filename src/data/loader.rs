use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, RawRecord, RoadDataset};

/// Canonical column headers of the tabular snapshot.
pub const ROAD_COLUMN: &str = "Road Name";
pub const DISTANCE_COLUMN: &str = "Distance (m)";
pub const ELEVATION_COLUMN: &str = "Elevation (m)";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a road dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat columns `Road Name` (utf8), `Distance (m)` and
///   `Elevation (m)` (numeric)
/// * `.json`    – records-oriented array:
///   `[{ "Road Name": "...", "Distance (m)": 0.0, "Elevation (m)": 0.0 }, ...]`
/// * `.csv`     – header row with the three canonical columns, one sample
///   per row
///
/// Cell-level garbage (missing names, non-numeric measurements) is not an
/// error here: those rows are dropped at the normalization boundary and
/// only counted in aggregate.
pub fn load_file(path: &Path) -> Result<RoadDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(RoadDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, what a sheet's `get_all_records`
/// export or `df.to_json(orient='records')` produces):
///
/// ```json
/// [
///   {
///     "Road Name": "Coastal Highway",
///     "Distance (m)": 120.0,
///     "Elevation (m)": "34.5",
///     "Surveyor": "ignored"
///   },
///   ...
/// ]
/// ```
///
/// Columns beyond the canonical three are ignored.
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        records.push(RawRecord {
            road: json_to_cell(obj.get(ROAD_COLUMN)),
            distance: json_to_cell(obj.get(DISTANCE_COLUMN)),
            elevation: json_to_cell(obj.get(ELEVATION_COLUMN)),
        });
    }

    Ok(records)
}

fn json_to_cell(val: Option<&JsonValue>) -> CellValue {
    match val {
        None | Some(JsonValue::Null) => CellValue::Empty,
        Some(JsonValue::String(s)) => CellValue::Text(s.clone()),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or(CellValue::Empty),
        Some(other) => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the canonical columns, then one sample per
/// row with plain numeric cells. All cells arrive as text; coercion happens
/// at the normalization boundary.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let road_idx = headers
        .iter()
        .position(|h| h == ROAD_COLUMN)
        .with_context(|| format!("CSV missing '{ROAD_COLUMN}' column"))?;
    let distance_idx = headers
        .iter()
        .position(|h| h == DISTANCE_COLUMN)
        .with_context(|| format!("CSV missing '{DISTANCE_COLUMN}' column"))?;
    let elevation_idx = headers
        .iter()
        .position(|h| h == ELEVATION_COLUMN)
        .with_context(|| format!("CSV missing '{ELEVATION_COLUMN}' column"))?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(RawRecord {
            road: csv_to_cell(record.get(road_idx)),
            distance: csv_to_cell(record.get(distance_idx)),
            elevation: csv_to_cell(record.get(elevation_idx)),
        });
    }

    Ok(records)
}

fn csv_to_cell(field: Option<&str>) -> CellValue {
    match field {
        None => CellValue::Empty,
        Some(s) if s.trim().is_empty() => CellValue::Empty,
        Some(s) => CellValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing road samples.
///
/// Expected schema: `Road Name` as Utf8/LargeUtf8, `Distance (m)` and
/// `Elevation (m)` as Float64 (Float32 and integer columns are widened).
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let road_idx = schema
            .index_of(ROAD_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{ROAD_COLUMN}' column"))?;
        let distance_idx = schema
            .index_of(DISTANCE_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{DISTANCE_COLUMN}' column"))?;
        let elevation_idx = schema
            .index_of(ELEVATION_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{ELEVATION_COLUMN}' column"))?;

        let road_col = batch.column(road_idx);
        let distance_col = batch.column(distance_idx);
        let elevation_col = batch.column(elevation_idx);

        for row in 0..batch.num_rows() {
            records.push(RawRecord {
                road: arrow_to_cell(road_col, row),
                distance: arrow_to_cell(distance_col, row),
                elevation: arrow_to_cell(elevation_col, row),
            });
        }
    }

    Ok(records)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_to_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Empty;
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            CellValue::Text(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_any().downcast_ref::<LargeStringArray>().unwrap();
            CellValue::Text(arr.value(row).to_string())
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Number(arr.value(row))
        }
        _ => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("rusty_roads_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_rows_with_bad_cells_are_dropped_not_raised() {
        let path = temp_file(
            "loader.csv",
            "Road Name,Distance (m),Elevation (m)\n\
             Coastal Highway,0,10\n\
             Coastal Highway,abc,20\n\
             ,100,30\n\
             Coastal Highway,200,40\n",
        );

        let dataset = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dropped_rows, 2);
        assert_eq!(dataset.road_names, vec!["Coastal Highway".to_string()]);
    }

    #[test]
    fn json_records_accept_numbers_and_numeric_text() {
        let path = temp_file(
            "loader.json",
            r#"[
                {"Road Name": "A", "Distance (m)": 0, "Elevation (m)": "10.5"},
                {"Road Name": "B", "Distance (m)": "3.0", "Elevation (m)": 4},
                {"Road Name": "A", "Distance (m)": null, "Elevation (m)": 1}
            ]"#,
        );

        let dataset = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dropped_rows, 1);
        assert_eq!(dataset.road_names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = std::env::temp_dir().join("rusty_roads_loader.xlsx");
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn csv_without_canonical_headers_is_an_error() {
        let path = temp_file("headers.csv", "name,km,height\nA,0,1\n");
        let result = load_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
