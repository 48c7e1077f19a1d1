use super::error::{DataError, Result};
use super::model::{RoadDataset, Sample};

// ---------------------------------------------------------------------------
// RoadSeries – the per-road derived view
// ---------------------------------------------------------------------------

/// The samples of one road, sorted ascending by distance.
///
/// A derived view over the immutable snapshot: recomputed per selection,
/// never mutated afterwards. The stable sort keeps rows with equal
/// distances in source order, which is what makes the duplicate-distance
/// tie-break deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSeries {
    pub name: String,
    pub samples: Vec<Sample>,
}

impl RoadSeries {
    /// Minimum and maximum sampled distance of the series.
    pub fn bounds(&self) -> Result<(f64, f64)> {
        if self.samples.is_empty() {
            return Err(DataError::EmptySeries(self.name.clone()));
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for s in &self.samples {
            min = min.min(s.distance);
            max = max.max(s.distance);
        }
        Ok((min, max))
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Build the series for one road by exact name match.
pub fn select_road(dataset: &RoadDataset, name: &str) -> Result<RoadSeries> {
    let mut samples: Vec<Sample> = dataset
        .rows
        .iter()
        .filter(|row| row.road == name)
        .map(|row| row.sample)
        .collect();

    if samples.is_empty() {
        return Err(DataError::RoadNotFound(name.to_string()));
    }

    samples.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    Ok(RoadSeries {
        name: name.to_string(),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, RawRecord};

    fn dataset(rows: &[(&str, f64, f64)]) -> RoadDataset {
        let records = rows
            .iter()
            .map(|&(road, d, e)| RawRecord {
                road: CellValue::Text(road.to_string()),
                distance: CellValue::Number(d),
                elevation: CellValue::Number(e),
            })
            .collect();
        RoadDataset::from_records(records).unwrap()
    }

    #[test]
    fn selection_sorts_by_distance() {
        let ds = dataset(&[("A", 10.0, 3.0), ("A", 0.0, 1.0), ("A", 5.0, 2.0)]);
        let series = select_road(&ds, "A").unwrap();
        let distances: Vec<f64> = series.samples.iter().map(|s| s.distance).collect();
        assert_eq!(distances, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn selection_ignores_other_roads() {
        let ds = dataset(&[("A", 0.0, 1.0), ("B", 2.0, 9.0), ("A", 1.0, 2.0)]);
        let series = select_road(&ds, "A").unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn unknown_road_is_road_not_found() {
        let ds = dataset(&[("A", 0.0, 1.0)]);
        let err = select_road(&ds, "Z").unwrap_err();
        assert!(matches!(err, DataError::RoadNotFound(name) if name == "Z"));
    }

    #[test]
    fn selection_is_idempotent() {
        let ds = dataset(&[("A", 3.0, 1.0), ("A", 1.0, 2.0), ("A", 2.0, 3.0)]);
        let first = select_road(&ds, "A").unwrap();
        let second = select_road(&ds, "A").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_distances_keep_source_order() {
        let ds = dataset(&[("A", 5.0, 100.0), ("A", 0.0, 1.0), ("A", 5.0, 200.0)]);
        let series = select_road(&ds, "A").unwrap();
        assert_eq!(series.samples[1].elevation, 100.0);
        assert_eq!(series.samples[2].elevation, 200.0);
    }

    #[test]
    fn bounds_are_min_and_max_distance() {
        let ds = dataset(&[("A", 4.0, 0.0), ("A", -2.0, 0.0), ("A", 7.5, 0.0)]);
        let series = select_road(&ds, "A").unwrap();
        assert_eq!(series.bounds().unwrap(), (-2.0, 7.5));
    }

    #[test]
    fn bounds_of_empty_series_fail() {
        let series = RoadSeries {
            name: "empty".to_string(),
            samples: Vec::new(),
        };
        assert!(matches!(
            series.bounds().unwrap_err(),
            DataError::EmptySeries(_)
        ));
    }
}
