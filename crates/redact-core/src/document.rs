//! Run-based document model
//!
//! A document is a list of paragraphs; a paragraph is an ordered list of runs;
//! a run is a span of text sharing one formatting state. Concatenating a
//! paragraph's runs yields its visible run text.

use crate::{Error, Formatting, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    text: String,
    formatting: Formatting,
    /// Index of the container element this run was materialized from.
    /// Siblings created by a split share the slot of the run they came from.
    slot: usize,
    dirty: bool,
}

impl Run {
    /// A run as loaded from a container. Not dirty.
    pub fn new(text: impl Into<String>, formatting: Formatting) -> Self {
        Self {
            text: text.into(),
            formatting,
            slot: 0,
            dirty: false,
        }
    }

    /// A freshly created run. Dirty from the start, since no container
    /// element backs it yet.
    pub fn with_formatting(text: impl Into<String>, formatting: Formatting) -> Self {
        Self {
            dirty: true,
            ..Self::new(text, formatting)
        }
    }

    pub fn at_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    /// Shorten the text to `at` bytes. `at` must lie on a char boundary.
    pub fn truncate(&mut self, at: usize) {
        self.text.truncate(at);
        self.dirty = true;
    }

    pub fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    pub fn formatting_mut(&mut self) -> &mut Formatting {
        self.dirty = true;
        &mut self.formatting
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn run_mut(&mut self, index: usize) -> Option<&mut Run> {
        self.runs.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Insert `runs` immediately after the run at `index`, keeping their order.
    pub fn insert_after(
        &mut self,
        index: usize,
        runs: impl IntoIterator<Item = Run>,
    ) -> Result<()> {
        if index >= self.runs.len() {
            return Err(Error::RunOutOfRange {
                index,
                len: self.runs.len(),
            });
        }
        let at = index + 1;
        self.runs.splice(at..at, runs);
        Ok(())
    }

    /// Runs materialized from container element `slot`, in order.
    pub fn slot_runs(&self, slot: usize) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(move |run| run.slot == slot)
    }

    pub fn is_dirty(&self) -> bool {
        self.runs.iter().any(Run::is_dirty)
    }

    /// Visible text: all run texts concatenated.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn run_count(&self) -> usize {
        self.paragraphs.iter().map(Paragraph::len).sum()
    }

    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(texts: &[&str]) -> Paragraph {
        Paragraph::new(
            texts
                .iter()
                .enumerate()
                .map(|(slot, text)| Run::new(*text, Formatting::new()).at_slot(slot))
                .collect(),
        )
    }

    #[test]
    fn test_paragraph_text() {
        let para = paragraph(&["Hello, ", "world", "!"]);
        assert_eq!(para.text(), "Hello, world!");
        assert_eq!(para.len(), 3);
        assert!(!para.is_dirty());
    }

    #[test]
    fn test_insert_after_keeps_order() {
        let mut para = paragraph(&["a", "d"]);
        para.insert_after(
            0,
            vec![
                Run::with_formatting("b", Formatting::new()).at_slot(0),
                Run::with_formatting("c", Formatting::new()).at_slot(0),
            ],
        )
        .unwrap();

        assert_eq!(para.text(), "abcd");
        assert_eq!(para.slot_runs(0).count(), 3);
        assert_eq!(para.slot_runs(1).map(Run::text).collect::<String>(), "d");
        assert!(para.is_dirty());
    }

    #[test]
    fn test_insert_after_out_of_range() {
        let mut para = paragraph(&["a"]);
        let err = para.insert_after(1, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::RunOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn test_mutation_marks_dirty() {
        let mut run = Run::new("secret", Formatting::new());
        assert!(!run.is_dirty());

        run.truncate(3);
        assert_eq!(run.text(), "sec");
        assert!(run.is_dirty());
    }

    #[test]
    fn test_document_text() {
        let doc = Document::new(vec![paragraph(&["one"]), paragraph(&["two", "three"])]);
        assert_eq!(doc.text(), "one\ntwothree");
        assert_eq!(doc.run_count(), 3);
    }
}
