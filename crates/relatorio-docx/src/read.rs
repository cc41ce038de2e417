//! Extraction of the table grid from `word/document.xml`.
//!
//! Only top-level `w:tbl` elements become grid tables; a table nested
//! inside a cell is opaque to the fill engine and passes through the
//! write path untouched. Cell text mirrors what python-docx reports:
//! run texts concatenated, paragraphs joined with `\n`, tabs and breaks
//! rendered as `\t` and `\n`.

use quick_xml::Reader;
use quick_xml::events::Event;
use relatorio_core::{Cell, Document, Row, Table};

use crate::error::DocxError;

/// Streaming state for one pass over the document body.
#[derive(Default)]
struct GridBuilder {
    tables: Vec<Table>,
    rows: Vec<Row>,
    cells: Vec<Cell>,
    paragraphs: Vec<String>,
    current_paragraph: String,
    /// Nesting depth of `w:tbl`; only depth 1 feeds the grid.
    tbl_depth: usize,
    in_cell: bool,
    in_text: bool,
}

impl GridBuilder {
    /// True while events belong to a top-level table cell.
    fn capturing(&self) -> bool {
        self.tbl_depth == 1 && self.in_cell
    }

    fn finish_cell(&mut self) {
        let text = std::mem::take(&mut self.paragraphs).join("\n");
        self.cells.push(Cell::new(text));
        self.in_cell = false;
    }
}

/// Parse `word/document.xml` into the core table grid.
pub(crate) fn parse_document_xml(xml: &str) -> Result<Document, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut b = GridBuilder::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => {
                    b.tbl_depth += 1;
                }
                b"w:tr" if b.tbl_depth == 1 => {
                    b.cells.clear();
                }
                b"w:tc" if b.tbl_depth == 1 => {
                    b.in_cell = true;
                    b.paragraphs.clear();
                    b.current_paragraph.clear();
                }
                b"w:p" if b.capturing() => {
                    b.current_paragraph.clear();
                }
                b"w:t" if b.capturing() => {
                    b.in_text = true;
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if b.capturing() => {
                    b.paragraphs.push(String::new());
                }
                b"w:tab" if b.capturing() => {
                    b.current_paragraph.push('\t');
                }
                b"w:br" | b"w:cr" if b.capturing() => {
                    b.current_paragraph.push('\n');
                }
                _ => {}
            },
            Event::Text(e) if b.in_text => {
                b.current_paragraph.push_str(&e.unescape()?);
            }
            Event::CData(e) if b.in_text => {
                b.current_paragraph
                    .push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => {
                    b.in_text = false;
                }
                b"w:p" if b.capturing() => {
                    b.paragraphs.push(std::mem::take(&mut b.current_paragraph));
                }
                b"w:tc" if b.tbl_depth == 1 && b.in_cell => {
                    b.finish_cell();
                }
                b"w:tr" if b.tbl_depth == 1 => {
                    b.rows.push(Row {
                        cells: std::mem::take(&mut b.cells),
                    });
                }
                b"w:tbl" => {
                    if b.tbl_depth == 1 {
                        b.tables.push(Table {
                            rows: std::mem::take(&mut b.rows),
                        });
                    }
                    b.tbl_depth = b.tbl_depth.saturating_sub(1);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(Document::new(b.tables))
}
