//! Redaction colors

use redact_core::{Formatting, Highlight, Rgb};

/// Named redaction color. Anything unrecognized is a blackout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedactionColor {
    White,
    Yellow,
    #[default]
    Black,
}

impl RedactionColor {
    /// Names are compared after trimming and ignoring ASCII case, so `"White"`
    /// selects white rather than falling back to black.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("white") => RedactionColor::White,
            Some("yellow") => RedactionColor::Yellow,
            Some("black") | None => RedactionColor::Black,
            Some(other) => {
                tracing::debug!(color = other, "unknown redaction color, using black");
                RedactionColor::Black
            }
        }
    }

    /// Text color and highlight: the same hue for both, so the text disappears.
    pub fn style(self) -> RedactionStyle {
        match self {
            RedactionColor::White => RedactionStyle::new(Rgb::WHITE, Highlight::White),
            RedactionColor::Yellow => RedactionStyle::new(Rgb::YELLOW, Highlight::Yellow),
            RedactionColor::Black => RedactionStyle::new(Rgb::BLACK, Highlight::Black),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedactionStyle {
    pub text: Rgb,
    pub highlight: Highlight,
}

impl RedactionStyle {
    pub fn new(text: Rgb, highlight: Highlight) -> Self {
        Self { text, highlight }
    }

    pub fn apply(&self, formatting: &mut Formatting) {
        formatting.set_highlight(self.highlight);
        formatting.set_color(self.text);
    }
}

impl Default for RedactionStyle {
    fn default() -> Self {
        RedactionColor::default().style()
    }
}
