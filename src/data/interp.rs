use super::error::{DataError, Result};
use super::model::Sample;
use super::select::RoadSeries;

// ---------------------------------------------------------------------------
// Piecewise-linear elevation lookup
// ---------------------------------------------------------------------------

/// Elevation at `target` metres along the road, treating the sorted series
/// as a piecewise-linear function of distance.
///
/// Queries outside the sampled range extrapolate along the slope of the
/// nearest edge segment rather than clamping or failing, so an out-of-range
/// distance still yields a number. Pure function of its inputs; no rounding
/// happens here, display formatting is the caller's business.
pub fn interpolate(series: &RoadSeries, target: f64) -> Result<f64> {
    if !target.is_finite() {
        return Err(DataError::InvalidInput(target));
    }
    let samples = &series.samples;
    if samples.len() < 2 {
        return Err(DataError::InsufficientData {
            name: series.name.clone(),
            count: samples.len(),
        });
    }

    // First index with distance >= target.
    let idx = samples.partition_point(|s| s.distance < target);

    // Exact hit: return the first sample at that distance, so duplicated
    // distances resolve deterministically.
    if let Some(hit) = samples.get(idx) {
        if hit.distance == target {
            return Ok(hit.elevation);
        }
    }

    // Bracketing segment, or the nearest edge segment when out of range.
    let (a, b) = if idx == 0 {
        (&samples[0], &samples[1])
    } else if idx == samples.len() {
        (&samples[samples.len() - 2], &samples[samples.len() - 1])
    } else {
        (&samples[idx - 1], &samples[idx])
    };

    Ok(lerp(a, b, target))
}

/// Straight-line value at `distance` on the segment from `a` to `b`.
/// A zero-width segment yields its start elevation instead of dividing by
/// zero.
fn lerp(a: &Sample, b: &Sample, distance: f64) -> f64 {
    let span = b.distance - a.distance;
    if span.abs() <= f64::EPSILON {
        return a.elevation;
    }
    a.elevation + (b.elevation - a.elevation) * (distance - a.distance) / span
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> RoadSeries {
        let mut samples: Vec<Sample> = points
            .iter()
            .map(|&(distance, elevation)| Sample {
                distance,
                elevation,
            })
            .collect();
        samples.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        RoadSeries {
            name: "test".to_string(),
            samples,
        }
    }

    #[test]
    fn endpoints_are_exact() {
        let s = series(&[(0.0, 10.0), (10.0, 20.0), (25.0, 5.0)]);
        assert_eq!(interpolate(&s, 0.0).unwrap(), 10.0);
        assert_eq!(interpolate(&s, 10.0).unwrap(), 20.0);
        assert_eq!(interpolate(&s, 25.0).unwrap(), 5.0);
    }

    #[test]
    fn midpoint_is_the_mean() {
        let s = series(&[(0.0, 10.0), (10.0, 20.0)]);
        assert_eq!(interpolate(&s, 5.0).unwrap(), 15.0);
    }

    #[test]
    fn extrapolates_below_minimum() {
        let s = series(&[(0.0, 10.0), (10.0, 20.0)]);
        assert_eq!(interpolate(&s, -10.0).unwrap(), 0.0);
    }

    #[test]
    fn extrapolates_above_maximum() {
        let s = series(&[(0.0, 10.0), (10.0, 20.0)]);
        assert_eq!(interpolate(&s, 20.0).unwrap(), 30.0);
    }

    #[test]
    fn interior_segments_use_their_own_slope() {
        let s = series(&[(0.0, 0.0), (10.0, 100.0), (30.0, 0.0)]);
        assert!((interpolate(&s, 20.0).unwrap() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_is_insufficient() {
        let s = series(&[(3.0, 7.0)]);
        let err = interpolate(&s, 3.0).unwrap_err();
        assert!(matches!(err, DataError::InsufficientData { count: 1, .. }));
    }

    #[test]
    fn non_finite_target_is_invalid() {
        let s = series(&[(0.0, 10.0), (10.0, 20.0)]);
        assert!(matches!(
            interpolate(&s, f64::NAN).unwrap_err(),
            DataError::InvalidInput(_)
        ));
        assert!(matches!(
            interpolate(&s, f64::INFINITY).unwrap_err(),
            DataError::InvalidInput(_)
        ));
    }

    #[test]
    fn duplicate_distance_resolves_to_first_occurrence() {
        // Stable sort keeps (5, 100) before (5, 200).
        let s = RoadSeries {
            name: "test".to_string(),
            samples: vec![
                Sample {
                    distance: 0.0,
                    elevation: 0.0,
                },
                Sample {
                    distance: 5.0,
                    elevation: 100.0,
                },
                Sample {
                    distance: 5.0,
                    elevation: 200.0,
                },
            ],
        };
        assert_eq!(interpolate(&s, 5.0).unwrap(), 100.0);
    }

    #[test]
    fn zero_width_edge_segment_does_not_divide_by_zero() {
        let s = series(&[(0.0, 10.0), (0.0, 30.0)]);
        let below = interpolate(&s, -5.0).unwrap();
        assert!(below.is_finite());
        assert_eq!(below, 10.0);
    }

    #[test]
    fn one_row_road_fails_on_interpolation_after_selection() {
        use crate::data::model::{CellValue, RawRecord, RoadDataset};
        use crate::data::select::select_road;

        let dataset = RoadDataset::from_records(vec![RawRecord {
            road: CellValue::Text("Lonely Rd".to_string()),
            distance: CellValue::Number(1.0),
            elevation: CellValue::Number(2.0),
        }])
        .unwrap();

        let s = select_road(&dataset, "Lonely Rd").unwrap();
        assert!(matches!(
            interpolate(&s, 1.0).unwrap_err(),
            DataError::InsufficientData { .. }
        ));
    }
}
