use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it comes out of a sheet.
///
/// Dates, durations and spreadsheet error cells are carried as `Text` holding
/// their display form; nothing downstream needs them typed.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// A cell from an untyped source (CSV). The text is kept verbatim;
    /// numeric readings happen where a number is needed.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – one sheet, one topic
// ---------------------------------------------------------------------------

/// One data row: column label → cell value. Empty cells are not stored.
pub type RawRow = BTreeMap<String, CellValue>;

/// A sheet as loaded, header row already consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Sheet name; doubles as the topic identifier.
    pub name: String,
    /// Column labels in sheet order.
    pub columns: Vec<String>,
    /// Data rows in stored order.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Workbook – the complete Loader result
// ---------------------------------------------------------------------------

/// All sheets of one source, in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub tables: Vec<RawTable>,
}

impl Workbook {
    pub fn new(tables: Vec<RawTable>) -> Self {
        Workbook { tables }
    }

    /// Look up a sheet by topic name.
    pub fn table(&self, name: &str) -> Option<&RawTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Total number of data rows across all sheets.
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(RawTable::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// A row that has a usable integer level. `text` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRow {
    pub text: String,
    pub level: i64,
}

/// A topic (sheet) and the levels found in it, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub levels: Vec<i64>,
}

impl Topic {
    pub fn has_level(&self, level: i64) -> bool {
        self.levels.contains(&level)
    }

    /// Levels in ascending order, for presentation.
    pub fn sorted_levels(&self) -> Vec<i64> {
        let mut levels = self.levels.clone();
        levels.sort_unstable();
        levels
    }
}

/// A drawn question, as kept in the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub topic: String,
    pub text: String,
    pub level: i64,
}
