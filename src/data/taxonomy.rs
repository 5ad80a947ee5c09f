use super::model::{CellValue, QuestionRow, RawTable, Topic, Workbook};
use crate::config::ColumnMapping;

// ---------------------------------------------------------------------------
// Level coercion
// ---------------------------------------------------------------------------

/// Interpret a level cell as an integer, or `None` if it is not one.
///
/// * `Integer(n)` → `n`
/// * `Float(f)` → `f` when it is a whole number inside the `i64` range
///   (spreadsheets store most numbers as floats)
/// * `Text(s)` → `s` trimmed, parsed as a base-10 integer, or as a decimal
///   that is a whole number (`"2.0"`), so CSV and xlsx levels agree
/// * anything else → `None`
///
/// Rows whose level yields `None` are left out of every derived view without
/// being reported.
pub fn parse_level(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Integer(n) => Some(*n),
        CellValue::Float(f) => whole_number(*f),
        CellValue::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        _ => None,
    }
}

fn whole_number(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// The rows of `table` that carry an integer level, in stored order.
///
/// A table without a recognisable level column yields nothing. A missing
/// question cell gives an empty `text`.
pub fn question_rows(table: &RawTable, columns: &ColumnMapping) -> Vec<QuestionRow> {
    let Some(level_col) = columns.level_column(&table.columns) else {
        return Vec::new();
    };
    let question_col = columns.question_column(&table.columns);

    table
        .rows
        .iter()
        .filter_map(|row| {
            let level = row.get(level_col).and_then(parse_level)?;
            let text = question_col
                .and_then(|col| row.get(col))
                .map(|cell| cell.to_string())
                .unwrap_or_default();
            Some(QuestionRow { text, level })
        })
        .collect()
}

/// Distinct levels of `rows` in order of first appearance.
pub fn distinct_levels(rows: &[QuestionRow]) -> Vec<i64> {
    let mut levels = Vec::new();
    for row in rows {
        if !levels.contains(&row.level) {
            levels.push(row.level);
        }
    }
    levels
}

/// One [`Topic`] per sheet, in sheet order. Always a full recomputation.
pub fn extract_topics(workbook: &Workbook, columns: &ColumnMapping) -> Vec<Topic> {
    workbook
        .tables
        .iter()
        .map(|table| {
            let levels = distinct_levels(&question_rows(table, columns));
            log::debug!("Topic '{}': levels {:?}", table.name, levels);
            Topic {
                name: table.name.clone(),
                levels,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRow;

    fn row(question: Option<&str>, level: CellValue) -> RawRow {
        let mut row = RawRow::new();
        if let Some(q) = question {
            row.insert("Frage".into(), CellValue::Text(q.into()));
        }
        if !level.is_empty() {
            row.insert("Stufe".into(), level);
        }
        row
    }

    fn table(name: &str, rows: Vec<RawRow>) -> RawTable {
        RawTable {
            name: name.into(),
            columns: vec!["Frage".into(), "Stufe".into()],
            rows,
        }
    }

    #[test]
    fn parse_level_policy() {
        assert_eq!(parse_level(&CellValue::Integer(3)), Some(3));
        assert_eq!(parse_level(&CellValue::Float(2.0)), Some(2));
        assert_eq!(parse_level(&CellValue::Float(2.5)), None);
        assert_eq!(parse_level(&CellValue::Float(f64::NAN)), None);
        assert_eq!(parse_level(&CellValue::Text(" 4 ".into())), Some(4));
        assert_eq!(parse_level(&CellValue::Text("-1".into())), Some(-1));
        assert_eq!(parse_level(&CellValue::Text("hard".into())), None);
        assert_eq!(parse_level(&CellValue::Text("2.0".into())), Some(2));
        assert_eq!(parse_level(&CellValue::Text("007".into())), Some(7));
        assert_eq!(parse_level(&CellValue::Text("2.5".into())), None);
        assert_eq!(parse_level(&CellValue::Text("Infinity".into())), None);
        assert_eq!(parse_level(&CellValue::Text("NaN".into())), None);
        assert_eq!(parse_level(&CellValue::Bool(true)), None);
        assert_eq!(parse_level(&CellValue::Empty), None);
    }

    #[test]
    fn float_levels_outside_i64_are_rejected() {
        let two_pow_63 = 2f64.powi(63);
        assert_eq!(parse_level(&CellValue::Float(two_pow_63)), None);
        assert_eq!(parse_level(&CellValue::Float(1e300)), None);
        assert_eq!(parse_level(&CellValue::Float(-two_pow_63)), Some(i64::MIN));
        assert_eq!(parse_level(&CellValue::Text("9223372036854775808.0".into())), None);
    }

    #[test]
    fn rows_without_numeric_level_are_excluded() {
        let t = table(
            "Math",
            vec![
                row(Some("Q1"), CellValue::Integer(1)),
                row(Some("Q2"), CellValue::Text("n/a".into())),
                row(Some("Q3"), CellValue::Empty),
                row(None, CellValue::Float(2.0)),
            ],
        );
        let rows = question_rows(&t, &ColumnMapping::default());
        assert_eq!(
            rows,
            vec![
                QuestionRow {
                    text: "Q1".into(),
                    level: 1
                },
                QuestionRow {
                    text: String::new(),
                    level: 2
                },
            ]
        );
    }

    #[test]
    fn levels_keep_first_appearance_order() {
        let t = table(
            "Math",
            vec![
                row(Some("a"), CellValue::Integer(3)),
                row(Some("b"), CellValue::Integer(1)),
                row(Some("c"), CellValue::Text("3".into())),
                row(Some("d"), CellValue::Text("x".into())),
                row(Some("e"), CellValue::Float(2.0)),
            ],
        );
        let topics = extract_topics(&Workbook::new(vec![t]), &ColumnMapping::default());
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].levels, vec![3, 1, 2]);
    }

    #[test]
    fn one_topic_per_sheet_in_sheet_order() {
        let wb = Workbook::new(vec![
            table("History", vec![row(Some("h"), CellValue::Integer(1))]),
            table("Math", vec![]),
            table("Art", vec![row(Some("a"), CellValue::Integer(5))]),
        ]);
        let topics = extract_topics(&wb, &ColumnMapping::default());
        let names: Vec<_> = topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["History", "Math", "Art"]);
        assert!(topics[1].levels.is_empty());
    }

    #[test]
    fn every_level_is_backed_by_a_row() {
        let t = table(
            "Math",
            vec![
                row(Some("a"), CellValue::Integer(2)),
                row(Some("b"), CellValue::Text("zwei".into())),
                row(Some("c"), CellValue::Float(7.0)),
            ],
        );
        let mapping = ColumnMapping::default();
        let rows = question_rows(&t, &mapping);
        let topics = extract_topics(&Workbook::new(vec![t]), &mapping);
        for level in &topics[0].levels {
            assert!(rows.iter().any(|r| r.level == *level));
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let wb = Workbook::new(vec![table(
            "Math",
            vec![
                row(Some("a"), CellValue::Integer(2)),
                row(Some("b"), CellValue::Integer(1)),
            ],
        )]);
        let snapshot = wb.clone();
        let mapping = ColumnMapping::default();
        assert_eq!(extract_topics(&wb, &mapping), extract_topics(&wb, &mapping));
        assert_eq!(wb, snapshot);
    }

    #[test]
    fn table_without_level_column_has_no_levels() {
        let t = RawTable {
            name: "Loose".into(),
            columns: vec!["Frage".into()],
            rows: vec![row(Some("q"), CellValue::Empty)],
        };
        assert!(question_rows(&t, &ColumnMapping::default()).is_empty());
    }
}
