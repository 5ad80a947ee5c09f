/// Data layer: core types, loading, taxonomy, sampling and the selection.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  bytes → Workbook (one RawTable per sheet)
///   └──────────┘
///        │
///        ├───────────────────┐
///        ▼                   ▼
///   ┌──────────┐       ┌──────────┐
///   │ taxonomy  │       │ sampler   │  (sheet, level, count) → texts
///   └──────────┘       └──────────┘
///   topics + levels          │
///                            ▼
///                      ┌───────────┐
///                      │ selection  │  ordered, editable Vec<Question>
///                      └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod sampler;
pub mod selection;
pub mod taxonomy;
