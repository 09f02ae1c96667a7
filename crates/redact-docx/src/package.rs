//! Zip package I/O

use std::io::{Cursor, Read, Seek, Write};

use lazy_static::lazy_static;
use regex::Regex;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::Result;
use crate::xml::attribute;

pub(crate) const CONTENT_TYPES: &str = "[Content_Types].xml";
pub(crate) const DEFAULT_MAIN_PART: &str = "word/document.xml";

const MAIN_CONTENT_TYPES: [&str; 2] = [
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    "application/vnd.ms-word.document.macroEnabled.main+xml",
];

lazy_static! {
    static ref OVERRIDE: Regex = Regex::new(r"<Override\b[^>]*>").expect("override pattern");
}

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub name: String,
    pub data: Vec<u8>,
    pub is_dir: bool,
}

/// Read every entry of the archive, preserving order.
pub(crate) fn read_entries<R: Read + Seek>(reader: R) -> Result<Vec<Entry>> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        entries.push(Entry {
            name: file.name().to_string(),
            is_dir: file.is_dir(),
            data,
        });
    }
    Ok(entries)
}

/// Write entries back in order. Media is stored, everything else deflated.
pub(crate) fn write_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for entry in entries {
        if entry.is_dir {
            zip.add_directory(entry.name.as_str(), stored)?;
            continue;
        }
        let options = if entry.name.starts_with("word/media/") {
            stored
        } else {
            deflated
        };
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.data)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Name of the main document part, as declared in `[Content_Types].xml`.
pub(crate) fn main_part_name(entries: &[Entry]) -> String {
    let declared = entries
        .iter()
        .find(|e| e.name == CONTENT_TYPES)
        .and_then(|e| std::str::from_utf8(&e.data).ok())
        .and_then(|types| {
            OVERRIDE.find_iter(types).find_map(|tag| {
                let tag = tag.as_str();
                let content_type = attribute(tag, "ContentType")?;
                if !MAIN_CONTENT_TYPES.contains(&content_type) {
                    return None;
                }
                attribute(tag, "PartName").map(|p| p.trim_start_matches('/').to_string())
            })
        });

    declared.unwrap_or_else(|| DEFAULT_MAIN_PART.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, data: &str) -> Entry {
        Entry {
            name: name.to_string(),
            data: data.as_bytes().to_vec(),
            is_dir: false,
        }
    }

    #[test]
    fn test_main_part_from_content_types() {
        let types = r#"<Types><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/main.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;
        let entries = vec![entry(CONTENT_TYPES, types)];

        assert_eq!(main_part_name(&entries), "word/main.xml");
    }

    #[test]
    fn test_main_part_default() {
        assert_eq!(main_part_name(&[]), DEFAULT_MAIN_PART);
    }

    #[test]
    fn test_entries_roundtrip_in_order() {
        let entries = vec![
            entry(CONTENT_TYPES, "<Types/>"),
            entry("word/document.xml", "<w:document/>"),
            entry("word/media/image1.png", "png"),
        ];

        let bytes = write_entries(&entries).unwrap();
        let read = read_entries(Cursor::new(bytes)).unwrap();

        let names: Vec<_> = read.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![CONTENT_TYPES, "word/document.xml", "word/media/image1.png"]);
        assert_eq!(read[1].data, b"<w:document/>");
    }
}
