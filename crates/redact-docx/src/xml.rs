//! Minimal markup scanner
//!
//! Indexes every element of a part by byte range so callers can walk the tree
//! and splice replacements into the original text. Comments, processing
//! instructions and CDATA are not elements and are skipped by the tag pattern.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{DocxError, Result};

lazy_static! {
    static ref TAG: Regex =
        Regex::new(r"<(?P<close>/?)(?P<name>[A-Za-z_][\w.:-]*)(?P<attrs>[^>]*?)(?P<empty>/?)>")
            .expect("tag pattern");
    static ref ATTR: Regex =
        Regex::new(r#"(?P<name>[A-Za-z_][\w.:-]*)\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#)
            .expect("attribute pattern");
    static ref ENTITY: Regex =
        Regex::new(r"&(?:#x(?P<hex>[0-9A-Fa-f]+)|#(?P<dec>[0-9]+)|(?P<named>amp|lt|gt|quot|apos));")
            .expect("entity pattern");
}

#[derive(Debug, Clone)]
pub(crate) struct Element<'a> {
    pub name: &'a str,
    pub depth: usize,
    /// Start tag through end tag.
    pub outer: Range<usize>,
    /// The start tag (or the whole element when self-closing).
    pub open: Range<usize>,
    /// Content between the tags; `None` when self-closing.
    pub inner: Option<Range<usize>>,
}

pub(crate) struct ElementIndex<'a> {
    xml: &'a str,
    elements: Vec<Element<'a>>,
}

impl<'a> ElementIndex<'a> {
    pub fn parse(xml: &'a str) -> Result<Self> {
        let mut elements = Vec::new();
        let mut stack: Vec<(&'a str, Range<usize>)> = Vec::new();

        for caps in TAG.captures_iter(xml) {
            let (Some(tag), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            let closing = caps.name("close").is_some_and(|m| !m.is_empty());
            let self_closing = caps.name("empty").is_some_and(|m| !m.is_empty());
            let name = name.as_str();

            if closing {
                let Some((open_name, open)) = stack.pop() else {
                    return Err(DocxError::Malformed {
                        offset: tag.start(),
                        message: format!("unexpected </{name}>"),
                    });
                };
                if open_name != name {
                    return Err(DocxError::Malformed {
                        offset: tag.start(),
                        message: format!("</{name}> closes <{open_name}>"),
                    });
                }
                elements.push(Element {
                    name,
                    depth: stack.len(),
                    outer: open.start..tag.end(),
                    inner: Some(open.end..tag.start()),
                    open,
                });
            } else if self_closing {
                elements.push(Element {
                    name,
                    depth: stack.len(),
                    outer: tag.range(),
                    open: tag.range(),
                    inner: None,
                });
            } else {
                stack.push((name, tag.range()));
            }
        }

        if let Some((name, open)) = stack.pop() {
            return Err(DocxError::Malformed {
                offset: open.start,
                message: format!("<{name}> is never closed"),
            });
        }

        elements.sort_by_key(|e| e.outer.start);
        Ok(Self { xml, elements })
    }

    /// Elements named `name` that are not nested inside another such element.
    pub fn outermost(&self, name: &'a str) -> impl Iterator<Item = &Element<'a>> + '_ {
        let mut covered_until = 0;
        self.elements.iter().filter(move |e| {
            if e.name != name || e.outer.start < covered_until {
                return false;
            }
            covered_until = e.outer.end;
            true
        })
    }

    /// Direct children of `parent`, in document order.
    pub fn children<'s>(
        &'s self,
        parent: &Element<'a>,
    ) -> impl Iterator<Item = &'s Element<'a>> + use<'a, 's> {
        let inner = parent.inner.clone().unwrap_or(parent.outer.end..parent.outer.end);
        let first = self.elements.partition_point(|e| e.outer.start < inner.start);
        let depth = parent.depth + 1;
        self.elements[first..]
            .iter()
            .take_while(move |e| e.outer.start < inner.end)
            .filter(move |e| e.depth == depth)
    }

    pub fn slice(&self, range: Range<usize>) -> &'a str {
        &self.xml[range]
    }
}

/// Value of attribute `name` in a start tag.
pub(crate) fn attribute<'t>(tag: &'t str, name: &str) -> Option<&'t str> {
    ATTR.captures_iter(tag)
        .find(|caps| caps.name("name").is_some_and(|n| n.as_str() == name))
        .and_then(|caps| caps.name("dq").or_else(|| caps.name("sq")))
        .map(|m| m.as_str())
}

pub(crate) fn unescape(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let code = if let Some(hex) = caps.name("hex") {
                u32::from_str_radix(hex.as_str(), 16).ok()
            } else if let Some(dec) = caps.name("dec") {
                dec.as_str().parse().ok()
            } else {
                None
            };
            if let Some(code) = code {
                return char::from_u32(code)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string());
            }
            let named = match caps.name("named").map(|m| m.as_str()) {
                Some("amp") => "&",
                Some("lt") => "<",
                Some("gt") => ">",
                Some("quot") => "\"",
                Some("apos") => "'",
                _ => &caps[0],
            };
            named.to_string()
        })
        .into_owned()
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARA: &str = r#"<?xml version="1.0"?><w:body><w:p w:rsidR="1"><w:r><w:rPr><w:b/></w:rPr><w:t>Hi</w:t></w:r></w:p><w:p/></w:body>"#;

    #[test]
    fn test_index_elements() {
        let index = ElementIndex::parse(PARA).unwrap();
        let paragraphs: Vec<_> = index.outermost("w:p").collect();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].depth, 1);
        assert!(paragraphs[1].inner.is_none());

        let runs: Vec<_> = index.children(paragraphs[0]).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].name, "w:r");

        let parts: Vec<_> = index.children(runs[0]).map(|e| e.name).collect();
        assert_eq!(parts, vec!["w:rPr", "w:t"]);
        assert_eq!(
            index.slice(index.children(runs[0]).nth(1).unwrap().inner.clone().unwrap()),
            "Hi"
        );
    }

    #[test]
    fn test_nested_paragraphs_skipped() {
        let xml = "<w:p><w:r><w:txbxContent><w:p><w:r/></w:p></w:txbxContent></w:r></w:p><w:p></w:p>";
        let index = ElementIndex::parse(xml).unwrap();

        let outer: Vec<_> = index.outermost("w:p").map(|e| e.outer.clone()).collect();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer[0].start, 0);
    }

    #[test]
    fn test_mismatched_tags() {
        assert!(matches!(
            ElementIndex::parse("<w:p><w:r></w:p>"),
            Err(DocxError::Malformed { .. })
        ));
        assert!(matches!(
            ElementIndex::parse("<w:p>"),
            Err(DocxError::Malformed { offset: 0, .. })
        ));
    }

    #[test]
    fn test_attribute() {
        let tag = r#"<w:br w:type="page" w:clear='all'/>"#;
        assert_eq!(attribute(tag, "w:type"), Some("page"));
        assert_eq!(attribute(tag, "w:clear"), Some("all"));
        assert_eq!(attribute(tag, "w:val"), None);
    }

    #[test]
    fn test_escape_roundtrip_entities() {
        assert_eq!(unescape("a &amp; b &lt;c&gt; &#65;&#x42; &quot;&apos;"), "a & b <c> AB \"'");
        assert_eq!(unescape("&unknown; &#xD800;"), "&unknown; &#xD800;");
        assert_eq!(escape("R&D <x>"), "R&amp;D &lt;x&gt;");
    }
}
