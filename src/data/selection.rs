use super::model::Question;

/// The operator's running list of drawn questions, in insertion order.
///
/// Entries are only ever appended from a draw or removed by position; no
/// uniqueness is enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    items: Vec<Question>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry per drawn text, all tagged with the topic and level
    /// the draw was made for.
    pub fn extend_from_draw<I>(&mut self, topic: &str, level: i64, texts: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.items.len();
        self.items.extend(texts.into_iter().map(|text| Question {
            topic: topic.to_string(),
            text,
            level,
        }));
        self.items.len() - before
    }

    /// Remove the entry at `index`, shifting later ones down. Out of range is
    /// a no-op and returns `None`.
    pub fn remove(&mut self, index: usize) -> Option<Question> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.items.iter()
    }

    /// `(n, text)` pairs numbered from 1, in insertion order.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, q)| (i + 1, q.text.as_str()))
    }
}
