//! Match resolution
//!
//! Turns the match spans found in one run into a segment plan: boundary
//! offsets that partition `[0, len]` and one highlight flag per segment.

use std::ops::Range;

use crate::{EngineError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentPlan {
    offsets: Vec<usize>,
    highlights: Vec<bool>,
}

/// Resolve ordered, non-overlapping, non-empty `spans` over a text of
/// `text_len` bytes.
///
/// Contiguous spans stay separate segments; only gaps between spans (and
/// before the first / after the last) produce pass-through segments.
pub fn resolve(spans: &[Range<usize>], text_len: usize) -> SegmentPlan {
    let Some((first, rest)) = spans.split_first() else {
        return SegmentPlan::default();
    };

    let mut offsets = Vec::with_capacity(spans.len() * 2 + 2);
    let mut highlights = Vec::with_capacity(spans.len() * 2 + 1);

    if first.start != 0 {
        offsets.push(0);
        highlights.push(false);
    }
    offsets.push(first.start);
    highlights.push(true);
    offsets.push(first.end);

    let mut prev = first.end;
    for span in rest {
        if span.start != prev {
            highlights.push(false);
            offsets.push(span.start);
        }
        highlights.push(true);
        offsets.push(span.end);
        prev = span.end;
    }

    if prev != text_len {
        highlights.push(false);
        offsets.push(text_len);
    }

    SegmentPlan {
        offsets,
        highlights,
    }
}

impl SegmentPlan {
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn highlights(&self) -> &[bool] {
        &self.highlights
    }

    pub fn into_parts(self) -> (Vec<bool>, Vec<usize>) {
        (self.highlights, self.offsets)
    }

    /// No match in the run.
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// A single match covers the whole run, so there is nothing to split.
    pub fn is_whole_run(&self) -> bool {
        self.offsets.len() == 2
    }

    /// Offsets strictly between the first and the last boundary.
    pub fn interior_offsets(&self) -> &[usize] {
        match self.offsets.len() {
            0..=2 => &[],
            n => &self.offsets[1..n - 1],
        }
    }

    pub fn highlighted_count(&self) -> usize {
        self.highlights.iter().filter(|h| **h).count()
    }

    /// `(range, highlight)` for each segment, left to right.
    pub fn segments(&self) -> impl Iterator<Item = (Range<usize>, bool)> + '_ {
        self.offsets
            .windows(2)
            .zip(&self.highlights)
            .map(|(bounds, highlight)| (bounds[0]..bounds[1], *highlight))
    }

    /// Check the plan against the text it was resolved for.
    pub fn validate(&self, text_len: usize) -> Result<()> {
        if self.offsets.is_empty() && self.highlights.is_empty() {
            return Ok(());
        }

        if self.highlights.len() + 1 != self.offsets.len() {
            return Err(EngineError::PlanMismatch {
                highlights: self.highlights.len(),
                offsets: self.offsets.len(),
            });
        }

        let increasing = self.offsets.windows(2).all(|w| w[0] < w[1]);
        let anchored = self.offsets.first() == Some(&0) && self.offsets.last() == Some(&text_len);
        if !increasing || !anchored {
            return Err(EngineError::InvalidSplit {
                offsets: self.offsets.clone(),
                len: text_len,
            });
        }

        Ok(())
    }
}
