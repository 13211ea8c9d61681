/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → normalize rows → MovieTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ MovieTable  │  Vec<MovieRecord>, genre catalog (immutable)
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterParams → conjunctive predicates → View
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ aggregate  │  │  export   │  View → grouped values / CSV bytes
///   └───────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parse;
