//! An opened `.docx` package

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use redact_core::Document;

use crate::body::{BodyLayout, parse_body, render_body};
use crate::package::{Entry, main_part_name, read_entries, write_entries};
use crate::{DocxError, Result};

pub struct DocxFile {
    entries: Vec<Entry>,
    main_part: usize,
    xml: String,
    layout: BodyLayout,
    document: Document,
}

impl DocxFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "opening document");
        Self::from_entries(read_entries(BufReader::new(file))?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_entries(read_entries(Cursor::new(bytes))?)
    }

    fn from_entries(entries: Vec<Entry>) -> Result<Self> {
        let name = main_part_name(&entries);
        let main_part = entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| DocxError::MissingPart(name.clone()))?;

        let xml = String::from_utf8(entries[main_part].data.clone())
            .map_err(|source| DocxError::Utf8 { part: name.clone(), source })?;
        let (document, layout) = parse_body(&xml)?;

        tracing::debug!(
            part = %name,
            bytes = xml.len(),
            entries = entries.len(),
            "loaded main part"
        );
        Ok(Self {
            entries,
            main_part,
            xml,
            layout,
            document,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The main part as it would be written now.
    pub fn main_part_xml(&self) -> String {
        render_body(&self.xml, &self.document, &self.layout)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut entries = self.entries.clone();
        entries[self.main_part].data = self.main_part_xml().into_bytes();
        write_entries(&entries)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved document");
        Ok(())
    }
}
