use rand::Rng;

use super::model::{QuestionRow, RawTable};
use super::taxonomy::question_rows;
use crate::config::ColumnMapping;

// ---------------------------------------------------------------------------
// Random draw without replacement
// ---------------------------------------------------------------------------

/// Draw up to `count` rows at `level` from `rows` and return their indices in
/// draw order.
///
/// The pool starts as every row whose level equals `level`. Each step removes
/// a uniformly chosen row from the pool; the row is kept only if its text is
/// non-empty. Drawing stops once `count` rows are kept or the pool runs dry,
/// so no row is ever returned twice and the loop runs at most `|pool|` times.
///
/// `count <= 0` and an unknown `level` both give an empty result.
pub fn draw<R: Rng + ?Sized>(
    rows: &[QuestionRow],
    level: i64,
    count: i64,
    rng: &mut R,
) -> Vec<usize> {
    if count <= 0 {
        return Vec::new();
    }
    let wanted = usize::try_from(count).unwrap_or(usize::MAX);

    let mut pool: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.level == level)
        .map(|(i, _)| i)
        .collect();

    let mut picked = Vec::with_capacity(wanted.min(pool.len()));
    while picked.len() < wanted && !pool.is_empty() {
        let idx = pool.swap_remove(rng.gen_range(0..pool.len()));
        if !rows[idx].text.is_empty() {
            picked.push(idx);
        }
    }
    picked
}

/// Texts of [`draw`], in draw order.
pub fn sample<R: Rng + ?Sized>(
    rows: &[QuestionRow],
    level: i64,
    count: i64,
    rng: &mut R,
) -> Vec<String> {
    draw(rows, level, count, rng)
        .into_iter()
        .map(|i| rows[i].text.clone())
        .collect()
}

/// [`sample`] straight from a loaded sheet.
pub fn sample_table<R: Rng + ?Sized>(
    table: &RawTable,
    columns: &ColumnMapping,
    level: i64,
    count: i64,
    rng: &mut R,
) -> Vec<String> {
    let rows = question_rows(table, columns);
    let texts = sample(&rows, level, count, rng);
    log::debug!(
        "Drew {} of {count} requested from '{}' at level {level}",
        texts.len(),
        table.name
    );
    texts
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::model::{CellValue, RawRow};

    fn q(text: &str, level: i64) -> QuestionRow {
        QuestionRow {
            text: text.into(),
            level,
        }
    }

    fn math_rows() -> Vec<QuestionRow> {
        let mut rows: Vec<_> = (1..=5).map(|i| q(&format!("L2 question {i}"), 2)).collect();
        rows.extend((1..=3).map(|i| q(&format!("L3 question {i}"), 3)));
        rows
    }

    #[test]
    fn exhausting_the_pool_does_not_pad() {
        let rows = math_rows();
        let mut rng = StdRng::seed_from_u64(7);
        let texts = sample(&rows, 2, 10, &mut rng);
        assert_eq!(texts.len(), 5);
        let distinct: BTreeSet<_> = texts.iter().collect();
        assert_eq!(distinct.len(), 5);
        assert!(texts.iter().all(|t| t.starts_with("L2")));
    }

    #[test]
    fn partial_draw_returns_exactly_count() {
        let rows = math_rows();
        let mut rng = StdRng::seed_from_u64(11);
        let texts = sample(&rows, 3, 2, &mut rng);
        assert_eq!(texts.len(), 2);
        assert_ne!(texts[0], texts[1]);
        assert!(texts.iter().all(|t| t.starts_with("L3")));
    }

    #[test]
    fn non_positive_count_is_empty() {
        let rows = math_rows();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample(&rows, 2, 0, &mut rng).is_empty());
        assert!(sample(&rows, 2, -4, &mut rng).is_empty());
    }

    #[test]
    fn unknown_level_is_empty() {
        let rows = math_rows();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample(&rows, 9, 3, &mut rng).is_empty());
    }

    #[test]
    fn never_draws_a_row_twice() {
        // identical texts on distinct rows are independent draws
        let rows = vec![q("same", 1), q("same", 1), q("other", 1), q("same", 1)];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = draw(&rows, 1, 10, &mut rng);
            let distinct: BTreeSet<_> = picked.iter().collect();
            assert_eq!(picked.len(), 4);
            assert_eq!(distinct.len(), picked.len());
        }
    }

    #[test]
    fn bounded_by_count_and_matching_rows() {
        let rows = math_rows();
        for seed in 0..20 {
            for count in 0..8 {
                let mut rng = StdRng::seed_from_u64(seed);
                let picked = draw(&rows, 3, count, &mut rng);
                assert!(picked.len() as i64 <= count);
                assert!(picked.len() <= 3);
                assert!(picked.iter().all(|&i| rows[i].level == 3));
            }
        }
    }

    #[test]
    fn empty_texts_are_consumed_but_not_returned() {
        let rows = vec![q("", 1), q("kept", 1), q("", 1)];
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample(&rows, 1, 3, &mut rng), vec!["kept".to_string()]);

        let blanks = vec![q("", 1), q("", 1)];
        assert!(sample(&blanks, 1, 5, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_draw_order() {
        let rows = math_rows();
        let a = sample(&rows, 2, 3, &mut StdRng::seed_from_u64(42));
        let b = sample(&rows, 2, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn sample_table_reads_the_sheet() {
        let mut rows = Vec::new();
        for (text, level) in [("a", "1"), ("b", "2"), ("c", "two"), ("d", "2")] {
            let mut row = RawRow::new();
            row.insert("question".into(), CellValue::Text(text.into()));
            row.insert("level".into(), CellValue::from_text(level));
            rows.push(row);
        }
        let table = RawTable {
            name: "Math".into(),
            columns: vec!["question".into(), "level".into()],
            rows,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut texts = sample_table(&table, &ColumnMapping::default(), 2, 10, &mut rng);
        texts.sort();
        assert_eq!(texts, ["b", "d"]);
    }
}
