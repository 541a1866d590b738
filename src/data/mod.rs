/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///   Model_CSV1.csv
///        │
///        ▼
///   ┌───────────┐
///   │  loader   │  parse once, derive Mean_RH → Arc<Dataset>
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  Dataset  │  Vec<Record>, column order, variety columns
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  filter   │  positive-severity rows per variety, SMW averages
///   └───────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod variety;
