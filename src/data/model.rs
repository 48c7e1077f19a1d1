use super::error::{DataError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single loosely-typed spreadsheet cell
// ---------------------------------------------------------------------------

/// A raw cell as supplied by the source file: text, a number, or nothing.
/// Records-oriented exports deliver numbers as numbers or as strings
/// depending on the writer, so both are accepted and coerced downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Coerce the cell to a finite `f64`.
    ///
    /// Text is trimmed and parsed; anything that fails to parse, or parses
    /// to NaN/±inf, is rejected so the row gets dropped at the boundary.
    pub fn as_finite_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v).filter(|v| v.is_finite()),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            CellValue::Empty => None,
        }
    }

    /// Coerce the cell to a non-empty road name. Numeric cells are accepted
    /// (route numbers show up as plain numbers in sheet exports).
    pub fn as_name(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(v) => Some(format!("{v}")),
            CellValue::Empty => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one pre-normalization row
// ---------------------------------------------------------------------------

/// One row of the tabular snapshot before validation, carrying the three
/// canonical columns `Road Name`, `Distance (m)`, `Elevation (m)`.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub road: CellValue,
    pub distance: CellValue,
    pub elevation: CellValue,
}

// ---------------------------------------------------------------------------
// Sample / RoadRow – typed rows after the parse-and-validate boundary
// ---------------------------------------------------------------------------

/// One validated (distance, elevation) measurement, both in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub distance: f64,
    pub elevation: f64,
}

/// A validated row tagged with the road it belongs to, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRow {
    pub road: String,
    pub sample: Sample,
}

// ---------------------------------------------------------------------------
// RoadDataset – the complete normalized snapshot
// ---------------------------------------------------------------------------

/// The full normalized dataset with the distinct-road index.
///
/// Built once per load cycle and never mutated; per-road series are derived
/// views recomputed on selection.
#[derive(Debug, Clone)]
pub struct RoadDataset {
    /// All validated rows, in source order.
    pub rows: Vec<RoadRow>,
    /// Distinct road names, deduplicated in first-seen order.
    pub road_names: Vec<String>,
    /// How many source rows were rejected at the boundary. Rejections are
    /// only reflected here in aggregate, never reported row by row.
    pub dropped_rows: usize,
}

impl RoadDataset {
    /// Normalize a raw snapshot into a typed dataset.
    ///
    /// A record survives only if its road name is non-empty and both
    /// numeric columns coerce to finite floats; everything else is dropped
    /// and counted. An entirely unusable snapshot is `DataUnavailable`.
    pub fn from_records(records: Vec<RawRecord>) -> Result<Self> {
        let mut rows: Vec<RoadRow> = Vec::with_capacity(records.len());
        let mut road_names: Vec<String> = Vec::new();
        let mut dropped_rows = 0usize;

        for rec in records {
            let Some(road) = rec.road.as_name() else {
                dropped_rows += 1;
                continue;
            };
            let (Some(distance), Some(elevation)) =
                (rec.distance.as_finite_f64(), rec.elevation.as_finite_f64())
            else {
                dropped_rows += 1;
                continue;
            };

            if !road_names.iter().any(|n| n == &road) {
                road_names.push(road.clone());
            }
            rows.push(RoadRow {
                road,
                sample: Sample {
                    distance,
                    elevation,
                },
            });
        }

        if rows.is_empty() {
            return Err(DataError::DataUnavailable);
        }

        Ok(RoadDataset {
            rows,
            road_names,
            dropped_rows,
        })
    }

    /// Number of validated rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(road: &str, distance: &str, elevation: &str) -> RawRecord {
        RawRecord {
            road: CellValue::Text(road.to_string()),
            distance: CellValue::Text(distance.to_string()),
            elevation: CellValue::Text(elevation.to_string()),
        }
    }

    #[test]
    fn coerces_numeric_text_with_whitespace() {
        assert_eq!(CellValue::Text("  12.5 ".into()).as_finite_f64(), Some(12.5));
        assert_eq!(CellValue::Number(3.0).as_finite_f64(), Some(3.0));
    }

    #[test]
    fn rejects_non_finite_cells() {
        assert_eq!(CellValue::Text("NaN".into()).as_finite_f64(), None);
        assert_eq!(CellValue::Text("inf".into()).as_finite_f64(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_finite_f64(), None);
        assert_eq!(CellValue::Empty.as_finite_f64(), None);
    }

    #[test]
    fn numeric_road_name_becomes_text() {
        assert_eq!(CellValue::Number(66.0).as_name(), Some("66".to_string()));
        assert_eq!(CellValue::Text("  ".into()).as_name(), None);
        assert_eq!(CellValue::Empty.as_name(), None);
    }

    #[test]
    fn drops_rows_that_fail_coercion() {
        let dataset = RoadDataset::from_records(vec![
            rec("A", "0", "10"),
            rec("A", "not a number", "20"),
            rec("", "5", "15"),
            rec("A", "10", "20"),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dropped_rows, 2);
    }

    #[test]
    fn road_names_keep_first_seen_order() {
        let dataset = RoadDataset::from_records(vec![
            rec("A", "0", "1"),
            rec("B", "0", "2"),
            rec("A", "5", "3"),
        ])
        .unwrap();

        assert_eq!(dataset.road_names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn empty_snapshot_is_data_unavailable() {
        let err = RoadDataset::from_records(vec![rec("", "x", "y")]).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable));

        let err = RoadDataset::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable));
    }
}
