//! Run formatting
//!
//! Formatting is an opaque, ordered bag of properties owned by the container
//! format (for WordprocessingML, one entry per `w:rPr` child). The model never
//! interprets property markup; it only knows whether a property may be copied
//! onto a sibling run created by a split.
//!
//! Highlight and text color are the two properties redaction writes, so they
//! are carried as typed overrides. A writer renders an override in place of
//! the opaque property of the same kind.

use std::fmt;

/// A single opaque formatting property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    markup: String,
    cloneable: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markup: markup.into(),
            cloneable: true,
        }
    }

    /// A property that belongs to one run only and is not copied to split siblings
    /// (revision marks, for example).
    pub fn uncloneable(name: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            cloneable: false,
            ..Self::new(name, markup)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatting {
    properties: Vec<Property>,
    highlight: Option<Highlight>,
    color: Option<Rgb>,
}

impl Formatting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties(properties: Vec<Property>) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = Some(highlight);
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = Some(color);
    }

    /// Copy of this formatting for a new sibling run.
    ///
    /// Properties that cannot be cloned are left out, so the sibling falls back
    /// to the container default for them.
    pub fn clone_for_split(&self) -> Formatting {
        let mut properties = Vec::with_capacity(self.properties.len());
        for property in &self.properties {
            if property.cloneable {
                properties.push(property.clone());
            } else {
                tracing::debug!(
                    property = %property.name,
                    "dropping uncloneable property on split run"
                );
            }
        }

        Formatting {
            properties,
            highlight: self.highlight,
            color: self.color,
        }
    }
}

/// 24-bit RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);

    /// Upper-case `RRGGBB` form.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Text highlight palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    Black,
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    Yellow,
    White,
    DarkBlue,
    DarkCyan,
    DarkGreen,
    DarkMagenta,
    DarkRed,
    DarkYellow,
    DarkGray,
    LightGray,
}

impl Highlight {
    pub fn as_str(self) -> &'static str {
        match self {
            Highlight::Black => "black",
            Highlight::Blue => "blue",
            Highlight::Cyan => "cyan",
            Highlight::Green => "green",
            Highlight::Magenta => "magenta",
            Highlight::Red => "red",
            Highlight::Yellow => "yellow",
            Highlight::White => "white",
            Highlight::DarkBlue => "darkBlue",
            Highlight::DarkCyan => "darkCyan",
            Highlight::DarkGreen => "darkGreen",
            Highlight::DarkMagenta => "darkMagenta",
            Highlight::DarkRed => "darkRed",
            Highlight::DarkYellow => "darkYellow",
            Highlight::DarkGray => "darkGray",
            Highlight::LightGray => "lightGray",
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
