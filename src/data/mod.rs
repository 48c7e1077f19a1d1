/// Data layer: core types, loading, selection, and interpolation.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → raw records → RoadDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RoadDataset │  validated rows, distinct-road index
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐       ┌──────────┐
///   │  select   │  ──▶  │  interp   │  RoadSeries → elevation at distance
///   └──────────┘       └──────────┘
/// ```
///
/// The cache wraps the loader in a time-bounded validity window so one
/// snapshot serves many interactions.

pub mod cache;
pub mod error;
pub mod interp;
pub mod loader;
pub mod model;
pub mod select;
