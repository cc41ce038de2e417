//! DOCX template loading and write-back for the fill engine.
//!
//! Bridges `.docx` archives to the core table grid: [`DocxTemplate`]
//! extracts tables from `word/document.xml`, hands the grid to the fill
//! engine, and writes the mutated cells back without disturbing any other
//! part of the archive.

mod error;
mod read;
mod template;
mod write;

pub use error::DocxError;
pub use template::DocxTemplate;
