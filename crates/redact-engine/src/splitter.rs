//! Run splitting

use std::ops::Range;

use redact_core::{Error as DocumentError, Paragraph, Run};

use crate::{EngineError, Result};

/// Split the run at `index` into `offsets.len() + 1` runs.
///
/// `offsets` must be strictly increasing and strictly inside the run's text.
/// The original run keeps its position and is truncated to the first slice;
/// the remaining slices become new runs inserted right after it, each
/// carrying a split clone of the original formatting.
///
/// Returns the index range the resulting runs occupy in the paragraph.
pub fn split_run(
    paragraph: &mut Paragraph,
    index: usize,
    offsets: &[usize],
) -> Result<Range<usize>> {
    let len = paragraph.len();
    let run = paragraph
        .run_mut(index)
        .ok_or(DocumentError::RunOutOfRange { index, len })?;

    let text = run.text();
    let interior = offsets.windows(2).all(|w| w[0] < w[1])
        && offsets
            .iter()
            .all(|&at| at > 0 && at < text.len() && text.is_char_boundary(at));
    if !interior {
        return Err(EngineError::InvalidSplit {
            offsets: offsets.to_vec(),
            len: text.len(),
        });
    }

    let Some(&first_cut) = offsets.first() else {
        return Ok(index..index + 1);
    };

    let bounds = offsets.iter().copied().chain(std::iter::once(text.len()));
    let siblings: Vec<Run> = offsets
        .iter()
        .copied()
        .zip(bounds.skip(1))
        .map(|(start, end)| {
            Run::with_formatting(&text[start..end], run.formatting().clone_for_split())
                .at_slot(run.slot())
        })
        .collect();

    run.truncate(first_cut);
    let created = siblings.len();
    paragraph.insert_after(index, siblings)?;

    tracing::trace!(index, created, "split run");
    Ok(index..index + created + 1)
}
