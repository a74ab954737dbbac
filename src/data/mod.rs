/// Data layer: core types, loading, aggregation, and filter queries.
///
/// Architecture:
/// ```text
///  data/*.csv | *.json   (eight sources)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetStore  │  load-once, validated, read-only
///   └──────────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐  ┌──────────┐
///   │ aggregate │  │  query    │  KPI scalars / filtered & grouped tables
///   └──────────┘  └──────────┘
/// ```
///
/// Everything below the store is a pure function of its table and selector
/// inputs: no I/O, no caches, no mutation of loaded data.

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod model;
pub mod query;
pub mod store;
