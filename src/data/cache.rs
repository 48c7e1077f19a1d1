use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use super::loader;
use super::model::RoadDataset;

/// How long a loaded snapshot stays fresh before the next interaction
/// cycle re-invokes the load path. Matches the source refresh window the
/// dataset owners expect for spreadsheet-backed data.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

// ---------------------------------------------------------------------------
// DatasetCache – time-bounded snapshot of the loaded dataset
// ---------------------------------------------------------------------------

/// An explicit cache object with an expiry window, owned by the app state
/// and consulted once per interaction cycle. Holding it as a value (rather
/// than ambient process-wide state) keeps the reload policy visible at the
/// call site and trivially testable.
pub struct DatasetCache {
    ttl: Duration,
    source: Option<PathBuf>,
    snapshot: Option<RoadDataset>,
    /// When the last load *attempt* happened. Stamped even on failure so a
    /// broken source is retried once per validity window, not once per
    /// frame.
    fetched_at: Option<Instant>,
}

impl DatasetCache {
    pub fn new(ttl: Duration) -> Self {
        DatasetCache {
            ttl,
            source: None,
            snapshot: None,
            fetched_at: None,
        }
    }

    /// The cached snapshot, fresh or not. A stale snapshot keeps rendering
    /// while a reload is pending or failing.
    pub fn get(&self) -> Option<&RoadDataset> {
        self.snapshot.as_ref()
    }

    /// Where the snapshot came from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether the validity window has passed and the source should be
    /// re-read on the next cycle. Without a source there is nothing to
    /// reload, so the cache is never stale.
    pub fn is_stale(&self) -> bool {
        self.source.is_some()
            && match self.fetched_at {
                Some(at) => at.elapsed() >= self.ttl,
                None => true,
            }
    }

    /// Drop the expiry stamp so the next interaction cycle reloads the
    /// source. The snapshot stays visible in the meantime.
    pub fn invalidate(&mut self) {
        self.fetched_at = None;
    }

    /// Point the cache at a new source file and load it immediately.
    pub fn load_from(&mut self, source: PathBuf) -> Result<()> {
        self.source = Some(source);
        self.refresh()
    }

    /// Re-read the remembered source. On failure the previous snapshot is
    /// kept and the error is surfaced to the caller.
    pub fn refresh(&mut self) -> Result<()> {
        let Some(source) = self.source.clone() else {
            bail!("no data source selected");
        };
        self.fetched_at = Some(Instant::now());
        let dataset = loader::load_file(&source)?;
        self.snapshot = Some(dataset);
        Ok(())
    }
}
