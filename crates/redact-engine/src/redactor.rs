//! Redaction pass over a document

use redact_core::{Document, Paragraph, Run};
use serde::{Deserialize, Serialize};

use crate::{PatternSet, RedactionColor, RedactionStyle, Result, resolve, split_run};

/// Counts collected during one redaction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionReport {
    pub paragraphs_scanned: usize,
    pub paragraphs_touched: usize,
    pub runs_scanned: usize,
    pub runs_split: usize,
    pub runs_created: usize,
    pub matches: usize,
}

impl RedactionReport {
    pub fn is_empty(&self) -> bool {
        self.matches == 0
    }
}

pub struct Redactor {
    patterns: PatternSet,
    replacement: Option<String>,
    style: RedactionStyle,
}

impl Redactor {
    pub fn new(patterns: PatternSet) -> Self {
        Self {
            patterns,
            replacement: None,
            style: RedactionStyle::default(),
        }
    }

    /// Text written over every match. `None` keeps the matched text;
    /// `Some("")` erases it.
    pub fn with_replacement(mut self, replacement: Option<String>) -> Self {
        self.replacement = replacement;
        self
    }

    pub fn with_color(mut self, color: RedactionColor) -> Self {
        self.style = color.style();
        self
    }

    /// Redact every paragraph of `document` in place.
    pub fn redact(&self, document: &mut Document) -> Result<RedactionReport> {
        let mut report = RedactionReport::default();

        for paragraph in document.paragraphs_mut() {
            let matches_before = report.matches;
            self.redact_paragraph(paragraph, &mut report)?;
            report.paragraphs_scanned += 1;
            if report.matches > matches_before {
                report.paragraphs_touched += 1;
            }
        }

        tracing::info!(
            paragraphs = report.paragraphs_touched,
            matches = report.matches,
            runs_created = report.runs_created,
            "redaction pass complete"
        );
        Ok(report)
    }

    /// Runs are visited last to first: splitting inserts after the current
    /// run, so earlier indices stay valid and new runs are never revisited.
    pub fn redact_paragraph(
        &self,
        paragraph: &mut Paragraph,
        report: &mut RedactionReport,
    ) -> Result<()> {
        let count = paragraph.len();
        for index in (0..count).rev() {
            self.redact_run(paragraph, index, report)?;
        }
        Ok(())
    }

    fn redact_run(
        &self,
        paragraph: &mut Paragraph,
        index: usize,
        report: &mut RedactionReport,
    ) -> Result<()> {
        report.runs_scanned += 1;

        let Some(run) = paragraph.run_mut(index) else {
            return Ok(());
        };
        if run.is_empty() {
            return Ok(());
        }

        let spans = self.patterns.find_spans(run.text());
        let plan = resolve(&spans, run.len());
        if plan.is_empty() {
            return Ok(());
        }
        plan.validate(run.len())?;
        report.matches += plan.highlighted_count();

        if plan.is_whole_run() {
            self.apply(run);
            return Ok(());
        }

        let range = split_run(paragraph, index, plan.interior_offsets())?;
        report.runs_split += 1;
        report.runs_created += range.len() - 1;
        tracing::debug!(
            run = index,
            segments = range.len(),
            matches = spans.len(),
            "split run"
        );

        for (run_index, (bytes, highlight)) in range.zip(plan.segments()) {
            if !highlight {
                continue;
            }
            tracing::trace!(run = run_index, ?bytes, "redacting segment");
            if let Some(run) = paragraph.run_mut(run_index) {
                self.apply(run);
            }
        }
        Ok(())
    }

    fn apply(&self, run: &mut Run) {
        if let Some(replacement) = &self.replacement {
            run.set_text(replacement.as_str());
        }
        self.style.apply(run.formatting_mut());
    }
}

/// One-shot redaction: compile `patterns`, resolve `color`, redact `document`.
pub fn redact(
    document: &mut Document,
    patterns: &[String],
    replacement: Option<&str>,
    color: Option<&str>,
) -> Result<RedactionReport> {
    let patterns = PatternSet::new(patterns.iter().cloned())?;
    Redactor::new(patterns)
        .with_replacement(replacement.map(str::to_string))
        .with_color(RedactionColor::from_name(color))
        .redact(document)
}
