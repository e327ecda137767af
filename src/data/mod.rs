/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///   URL / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  fetch    │  worker thread: read text → parse
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  CSV text → Vec<ProductRecord> (+ skipped row count)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ProductDataset  │  records, unique brands / platforms
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  visible records → CSV text → file
///   └──────────┘
/// ```

pub mod export;
pub mod fetch;
pub mod filter;
pub mod model;
pub mod parser;
