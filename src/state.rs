use crate::color::ColorMap;
use crate::data::cache::{DEFAULT_TTL, DatasetCache};
use crate::data::interp::interpolate;
use crate::data::model::RoadDataset;
use crate::data::select::{RoadSeries, select_road};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Derived views (the active road's series and bounds) are recomputed from
/// the cached snapshot on demand instead of being stored, so every
/// interaction sees a consistent picture of one immutable snapshot.
pub struct AppState {
    /// Time-bounded cache around the loaded dataset.
    pub cache: DatasetCache,

    /// Name of the active road (None until a dataset is loaded).
    pub selected_road: Option<String>,

    /// Target distance for the interpolation query, in metres.
    pub target_distance: f64,

    /// Last computed (distance, elevation) pair; feeds the readout and the
    /// chart marker until the road or the snapshot changes.
    pub computed: Option<(f64, f64)>,

    /// Road-name colours for the current snapshot.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: DatasetCache::new(DEFAULT_TTL),
            selected_road: None,
            target_distance: 0.0,
            computed: None,
            color_map: ColorMap::new(&[]),
            status_message: None,
        }
    }
}

impl AppState {
    /// The current snapshot, fresh or stale.
    pub fn dataset(&self) -> Option<&RoadDataset> {
        self.cache.get()
    }

    /// The active road's series, recomputed from the snapshot.
    pub fn selected_series(&self) -> Option<RoadSeries> {
        let dataset = self.cache.get()?;
        let name = self.selected_road.as_deref()?;
        select_road(dataset, name).ok()
    }

    /// Distance range of the active road.
    pub fn selected_bounds(&self) -> Option<(f64, f64)> {
        self.selected_series().and_then(|s| s.bounds().ok())
    }

    /// Reconcile UI state with a freshly stored snapshot: rebuild colours,
    /// keep the selected road when it still exists (default = first road),
    /// and discard the previous query result.
    pub fn adopt_snapshot(&mut self) {
        self.computed = None;
        self.status_message = None;

        let Some(dataset) = self.cache.get() else {
            self.selected_road = None;
            self.color_map = ColorMap::new(&[]);
            return;
        };
        self.color_map = ColorMap::new(&dataset.road_names);

        let still_there = self
            .selected_road
            .as_ref()
            .map(|name| dataset.road_names.contains(name))
            .unwrap_or(false);
        if !still_there {
            self.selected_road = dataset.road_names.first().cloned();
        }

        if still_there {
            self.clamp_target();
        } else {
            self.reset_target();
        }
    }

    /// Switch the active road. The query target is clamped into the new
    /// road's range; the previous result is discarded.
    pub fn set_selected_road(&mut self, name: String) {
        if self.selected_road.as_deref() == Some(name.as_str()) {
            return;
        }
        self.selected_road = Some(name);
        self.computed = None;
        self.clamp_target();
    }

    /// Run the interpolation query at the current target distance.
    /// Explicit trigger: only the compute button calls this.
    pub fn compute(&mut self) {
        self.computed = None;
        let Some(dataset) = self.cache.get() else {
            return;
        };
        let Some(name) = self.selected_road.clone() else {
            return;
        };

        let result = select_road(dataset, &name)
            .and_then(|series| interpolate(&series, self.target_distance));
        match result {
            Ok(elevation) => {
                self.computed = Some((self.target_distance, elevation));
                self.status_message = None;
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    fn clamp_target(&mut self) {
        if let Some((min, max)) = self.selected_bounds() {
            self.target_distance = self.target_distance.clamp(min, max);
        }
    }

    /// Default query distance for a fresh selection: a quarter of the way
    /// along the road.
    fn reset_target(&mut self) {
        self.target_distance = match self.selected_bounds() {
            Some((min, max)) => min + (max - min) / 4.0,
            None => 0.0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TWO_ROADS_CSV: &str = "Road Name,Distance (m),Elevation (m)\n\
                                 A,0,10\n\
                                 A,10,20\n\
                                 B,5,100\n\
                                 B,15,110\n";

    fn loaded_state(name: &str) -> (AppState, PathBuf) {
        let path = std::env::temp_dir().join(format!("rusty_roads_{}_{name}", std::process::id()));
        std::fs::write(&path, TWO_ROADS_CSV).unwrap();

        let mut state = AppState::default();
        state.cache.load_from(path.clone()).unwrap();
        state.adopt_snapshot();
        (state, path)
    }

    #[test]
    fn adopting_a_snapshot_selects_the_first_road() {
        let (state, path) = loaded_state("state_first.csv");
        std::fs::remove_file(&path).ok();

        assert_eq!(state.selected_road.as_deref(), Some("A"));
        // Quarter of the way along road A (0..10).
        assert_eq!(state.target_distance, 2.5);
    }

    #[test]
    fn switching_roads_clamps_the_target_into_range() {
        let (mut state, path) = loaded_state("state_switch.csv");
        std::fs::remove_file(&path).ok();

        state.set_selected_road("B".to_string());
        assert_eq!(state.target_distance, 5.0);
        assert!(state.computed.is_none());
    }

    #[test]
    fn compute_stores_the_query_pair() {
        let (mut state, path) = loaded_state("state_compute.csv");
        std::fs::remove_file(&path).ok();

        state.compute();
        assert_eq!(state.computed, Some((2.5, 12.5)));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn compute_without_a_dataset_is_a_no_op() {
        let mut state = AppState::default();
        state.compute();
        assert!(state.computed.is_none());
        assert!(state.status_message.is_none());
    }
}
