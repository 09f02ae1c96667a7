//! Pattern compilation
//!
//! All fragments are joined into one alternation and compiled once. Matching
//! is leftmost-first and non-overlapping, scanning left to right.

use std::ops::Range;

use regex::Regex;

use crate::{EngineError, Result};

#[derive(Debug, Clone)]
pub struct PatternSet {
    regex: Regex,
}

impl PatternSet {
    pub fn new<I, S>(fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept = Vec::new();
        for fragment in fragments {
            let fragment = fragment.into();
            if fragment.is_empty() {
                tracing::warn!("ignoring empty pattern");
                continue;
            }
            Regex::new(&fragment).map_err(|source| EngineError::InvalidPattern {
                pattern: fragment.clone(),
                source,
            })?;
            kept.push(fragment);
        }

        if kept.is_empty() {
            return Err(EngineError::NoPatterns);
        }

        // Grouping keeps inline flags such as `(?i)` local to their fragment.
        let joined = kept
            .iter()
            .map(|f| format!("(?:{f})"))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&joined).map_err(|source| EngineError::InvalidPattern {
            pattern: joined.clone(),
            source,
        })?;

        Ok(Self { regex })
    }

    /// Split a comma-separated pattern list, trimming each fragment.
    pub fn parse_list(list: &str) -> Vec<String> {
        list.split(',').map(|p| p.trim().to_string()).collect()
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Byte spans of all non-empty matches in `text`.
    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(text)
            .map(|m| m.range())
            .filter(|range| !range.is_empty())
            .collect()
    }
}
