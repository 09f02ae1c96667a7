//! Main document part <-> run model
//!
//! Outermost `w:p` elements become paragraphs. A direct `w:r` child becomes a
//! run when it only holds text-like content; runs carrying drawings, fields or
//! other objects stay out of the model and are written back untouched.

use std::ops::Range;

use redact_core::{Document, Formatting, Paragraph, Property, Run};

use crate::Result;
use crate::xml::{Element, ElementIndex, attribute, escape, unescape};

/// `w:rPr` child order required by the schema (`CT_RPr`).
const RPR_ORDER: &[&str] = &[
    "w:rStyle",
    "w:rFonts",
    "w:b",
    "w:bCs",
    "w:i",
    "w:iCs",
    "w:caps",
    "w:smallCaps",
    "w:strike",
    "w:dstrike",
    "w:outline",
    "w:shadow",
    "w:emboss",
    "w:imprint",
    "w:noProof",
    "w:snapToGrid",
    "w:vanish",
    "w:webHidden",
    "w:color",
    "w:spacing",
    "w:w",
    "w:kern",
    "w:position",
    "w:sz",
    "w:szCs",
    "w:highlight",
    "w:u",
    "w:effect",
    "w:bdr",
    "w:shd",
    "w:fitText",
    "w:vertAlign",
    "w:rtl",
    "w:cs",
    "w:em",
    "w:lang",
    "w:eastAsianLayout",
    "w:specVanish",
    "w:oMath",
    "w:rPrChange",
];

const HIGHLIGHT: &str = "w:highlight";
const COLOR: &str = "w:color";

/// Run text stands in for the inline markers a run may hold; each marker maps
/// to its own char so a rewritten run emits the same markers it was read from.
const TAB: char = '\t';
const BREAK: char = '\n';
const CARRIAGE_RETURN: char = '\r';
const NON_BREAKING_HYPHEN: char = '\u{2011}';

/// Where each exposed run lives in the part.
#[derive(Debug, Clone)]
struct RunSlot {
    outer: Range<usize>,
    open_tag: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct BodyLayout {
    paragraphs: Vec<Vec<RunSlot>>,
}

pub(crate) fn parse_body(xml: &str) -> Result<(Document, BodyLayout)> {
    let index = ElementIndex::parse(xml)?;
    let mut document = Document::default();
    let mut layout = BodyLayout::default();

    for paragraph in index.outermost("w:p") {
        let mut runs = Vec::new();
        let mut slots = Vec::new();
        for element in index.children(paragraph).filter(|e| e.name == "w:r") {
            let Some(run) = parse_run(&index, element) else {
                continue;
            };
            runs.push(run.at_slot(slots.len()));
            slots.push(RunSlot {
                outer: element.outer.clone(),
                open_tag: start_tag(index.slice(element.open.clone())),
            });
        }
        document.push(Paragraph::new(runs));
        layout.paragraphs.push(slots);
    }

    tracing::debug!(
        paragraphs = document.paragraphs().len(),
        runs = document.run_count(),
        "parsed document body"
    );
    Ok((document, layout))
}

/// `None` when the run holds anything besides text-like content.
fn parse_run(index: &ElementIndex<'_>, run: &Element<'_>) -> Option<Run> {
    let mut text = String::new();
    let mut formatting = Formatting::new();

    for child in index.children(run) {
        match child.name {
            "w:rPr" => formatting = parse_properties(index, child),
            "w:t" => {
                if let Some(inner) = child.inner.clone() {
                    text.push_str(&unescape(index.slice(inner)));
                }
            }
            "w:tab" => text.push(TAB),
            "w:cr" => text.push(CARRIAGE_RETURN),
            "w:br" => {
                let tag = index.slice(child.open.clone());
                let plain = matches!(attribute(tag, "w:type"), None | Some("textWrapping"))
                    && attribute(tag, "w:clear").is_none();
                if !plain {
                    return None;
                }
                text.push(BREAK);
            }
            "w:noBreakHyphen" => text.push(NON_BREAKING_HYPHEN),
            "w:lastRenderedPageBreak" => {}
            _ => return None,
        }
    }

    Some(Run::new(text, formatting))
}

fn parse_properties(index: &ElementIndex<'_>, rpr: &Element<'_>) -> Formatting {
    let properties = index
        .children(rpr)
        .map(|child| {
            let markup = index.slice(child.outer.clone());
            if child.name == "w:rPrChange" {
                Property::uncloneable(child.name, markup)
            } else {
                Property::new(child.name, markup)
            }
        })
        .collect();
    Formatting::from_properties(properties)
}

/// A self-closing `<w:r/>` becomes an opening tag so content can follow.
fn start_tag(tag: &str) -> String {
    match tag.strip_suffix("/>") {
        Some(head) => format!("{}>", head.trim_end()),
        None => tag.to_string(),
    }
}

/// Rewrite `xml`, re-serializing only slots that hold changed runs.
pub(crate) fn render_body(xml: &str, document: &Document, layout: &BodyLayout) -> String {
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    if document.paragraphs().len() != layout.paragraphs.len() {
        tracing::warn!(
            model = document.paragraphs().len(),
            part = layout.paragraphs.len(),
            "paragraph count changed since load; extra paragraphs are not written"
        );
    }

    for (paragraph, slots) in document.paragraphs().iter().zip(&layout.paragraphs) {
        if !paragraph.is_dirty() {
            continue;
        }
        for (slot_index, slot) in slots.iter().enumerate() {
            if !paragraph.slot_runs(slot_index).any(Run::is_dirty) {
                continue;
            }
            let markup: String = paragraph
                .slot_runs(slot_index)
                .map(|run| render_run(&slot.open_tag, run))
                .collect();
            edits.push((slot.outer.clone(), markup));
        }
    }

    tracing::debug!(slots = edits.len(), "rewriting runs");
    splice(xml, &edits)
}

/// Apply non-overlapping, ascending edits.
fn splice(xml: &str, edits: &[(Range<usize>, String)]) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        out.push_str(&xml[cursor..range.start]);
        out.push_str(replacement);
        cursor = range.end;
    }
    out.push_str(&xml[cursor..]);
    out
}

fn render_run(open_tag: &str, run: &Run) -> String {
    let mut out = String::from(open_tag);
    out.push_str(&render_properties(run.formatting()));

    let mut pending = String::new();
    for ch in run.text().chars() {
        let marker = match ch {
            TAB => "<w:tab/>",
            BREAK => "<w:br/>",
            CARRIAGE_RETURN => "<w:cr/>",
            NON_BREAKING_HYPHEN => "<w:noBreakHyphen/>",
            _ => {
                pending.push(ch);
                continue;
            }
        };
        flush_text(&mut out, &mut pending);
        out.push_str(marker);
    }
    flush_text(&mut out, &mut pending);

    out.push_str("</w:r>");
    out
}

fn flush_text(out: &mut String, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    out.push_str(r#"<w:t xml:space="preserve">"#);
    out.push_str(&escape(pending));
    out.push_str("</w:t>");
    pending.clear();
}

fn rank(name: &str) -> usize {
    RPR_ORDER
        .iter()
        .position(|known| *known == name)
        .unwrap_or(RPR_ORDER.len())
}

fn render_properties(formatting: &Formatting) -> String {
    let mut items: Vec<(usize, String)> = formatting
        .properties()
        .iter()
        .filter(|p| {
            let replaced_highlight = p.name() == HIGHLIGHT && formatting.highlight().is_some();
            let replaced_color = p.name() == COLOR && formatting.color().is_some();
            !(replaced_highlight || replaced_color)
        })
        .map(|p| (rank(p.name()), p.markup().to_string()))
        .collect();

    let overrides = [
        formatting
            .color()
            .map(|c| (COLOR, format!(r#"<w:color w:val="{}"/>"#, c.to_hex()))),
        formatting
            .highlight()
            .map(|h| (HIGHLIGHT, format!(r#"<w:highlight w:val="{}"/>"#, h.as_str()))),
    ];
    for (name, markup) in overrides.into_iter().flatten() {
        let rank = rank(name);
        let at = items
            .iter()
            .position(|(r, _)| *r > rank)
            .unwrap_or(items.len());
        items.insert(at, (rank, markup));
    }

    if items.is_empty() {
        return String::new();
    }
    let mut out = String::from("<w:rPr>");
    for (_, markup) in items {
        out.push_str(&markup);
    }
    out.push_str("</w:rPr>");
    out
}
