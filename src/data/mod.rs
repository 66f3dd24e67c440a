/// Data layer: launch records, loading, filtering and the two chart queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, sites, payload bounds
///   └───────────────┘
///        │                         FilterState (site, payload range)
///        ├──────────────┐                │
///        ▼              ▼                ▼
///   ┌───────────┐  ┌────────────┐  ┌──────────┐
///   │ aggregate  │  │ correlate   │◄─│  filter   │
///   └───────────┘  └────────────┘  └──────────┘
///     PieChart       ScatterChart
/// ```

pub mod aggregate;
pub mod correlate;
pub mod filter;
pub mod loader;
pub mod model;
