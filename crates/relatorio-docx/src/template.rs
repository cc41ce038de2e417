//! A loaded `.docx` template and its write-back.
//!
//! The whole archive is held in memory: every entry's raw bytes are kept
//! as read, and saving rebuilds the archive with only `word/document.xml`
//! rewritten. Everything the fill engine did not touch round-trips
//! byte-identically.

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use relatorio_core::Document;
use tracing::debug;
use zip::write::{FileOptions, ZipWriter};
use zip::ZipArchive;

use crate::error::DocxError;
use crate::read::parse_document_xml;
use crate::write::patch_document_xml;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug)]
struct ArchiveEntry {
    name: String,
    bytes: Vec<u8>,
    is_dir: bool,
}

/// A `.docx` template opened for filling.
#[derive(Debug)]
pub struct DocxTemplate {
    entries: Vec<ArchiveEntry>,
    document_xml: String,
    /// Grid as loaded; the diff against `grid` drives the write-back.
    baseline: Document,
    grid: Document,
}

impl DocxTemplate {
    /// Open a template from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocxError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let template = Self::from_reader(file)?;
        debug!(
            path = %path.display(),
            tables = template.grid.tables.len(),
            "template loaded"
        );
        Ok(template)
    }

    /// Open a template from any seekable byte source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, DocxError> {
        let mut archive = ZipArchive::new(reader)?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            entries.push(ArchiveEntry {
                name: entry.name().to_string(),
                bytes,
                is_dir: entry.is_dir(),
            });
        }

        let document_xml = entries
            .iter()
            .find(|e| e.name == DOCUMENT_PART)
            .map(|e| String::from_utf8(e.bytes.clone()))
            .ok_or(DocxError::MissingPart(DOCUMENT_PART))??;

        let baseline = parse_document_xml(&document_xml)?;
        let grid = baseline.clone();

        Ok(Self {
            entries,
            document_xml,
            baseline,
            grid,
        })
    }

    /// The table grid, as the fill engine sees it.
    pub fn document(&self) -> &Document {
        &self.grid
    }

    /// Mutable grid access for the fill engine.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.grid
    }

    /// Write the filled document to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocxError> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)?;
        debug!(path = %path.as_ref().display(), "document written");
        Ok(())
    }

    /// Write the filled document to any seekable sink.
    pub fn write_to<W: Write + Seek>(&self, sink: W) -> Result<(), DocxError> {
        let patched = patch_document_xml(&self.document_xml, &self.baseline, &self.grid)?;

        let mut writer = ZipWriter::new(sink);
        let options: FileOptions<()> = FileOptions::default();
        for entry in &self.entries {
            if entry.is_dir {
                writer.add_directory(entry.name.as_str(), options)?;
            } else {
                writer.start_file(entry.name.as_str(), options)?;
                if entry.name == DOCUMENT_PART {
                    writer.write_all(patched.as_bytes())?;
                } else {
                    writer.write_all(&entry.bytes)?;
                }
            }
        }
        writer.finish()?;
        Ok(())
    }
}
