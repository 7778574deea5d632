/// Data layer: core types, loading, aggregation and binning.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Row>, column headers
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ aggregate │  │ binning  │  group → stats / x-bins → mean y
///   └───────────┘  └──────────┘
///        │              │
///        ▼              ▼
///   ┌──────────────────────┐
///   │ charts               │  ChartSet: six chart-ready record lists
///   └──────────────────────┘
/// ```

pub mod aggregate;
pub mod binning;
pub mod charts;
pub mod loader;
pub mod model;
