/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///   time,position,u,v  (headerless CSV)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Row>
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ TimeSeries  │  rows grouped by time, first-occurrence order
///   └────────────┘
/// ```

pub mod loader;
pub mod model;
