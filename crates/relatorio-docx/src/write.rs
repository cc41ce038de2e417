//! Write-back of mutated cell text into `word/document.xml`.
//!
//! The patcher streams the original XML event-for-event and only touches
//! cells whose grid text changed since load, so every untouched run keeps
//! its formatting and the rest of the document stays byte-identical.
//!
//! Inside a changed cell the new text lands in the cell's first `w:t`;
//! any further `w:t` content is blanked. A cell with no run at all (the
//! usual shape of a blank fill target) gets a run injected into its first
//! paragraph.

use std::collections::HashMap;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use relatorio_core::Document;

use crate::error::DocxError;

/// Cells whose text differs between the loaded grid and the current one,
/// keyed by (table, row, column).
pub(crate) fn changed_cells(
    baseline: &Document,
    current: &Document,
) -> HashMap<(usize, usize, usize), String> {
    let mut changed = HashMap::new();
    for (t, (old_table, new_table)) in baseline.tables.iter().zip(&current.tables).enumerate() {
        for (r, (old_row, new_row)) in old_table.rows.iter().zip(&new_table.rows).enumerate() {
            for (c, (old_cell, new_cell)) in old_row.cells.iter().zip(&new_row.cells).enumerate() {
                if old_cell.text() != new_cell.text() {
                    changed.insert((t, r, c), new_cell.text().to_string());
                }
            }
        }
    }
    changed
}

/// Patch state for the cell currently being streamed.
struct CellPatch {
    value: String,
    written: bool,
}

struct PatchWalker {
    changed: HashMap<(usize, usize, usize), String>,
    tbl_depth: usize,
    table_idx: usize,
    row_idx: usize,
    cell_idx: usize,
    patch: Option<CellPatch>,
    in_wt: bool,
}

impl PatchWalker {
    fn patching(&self) -> bool {
        self.tbl_depth == 1 && self.patch.is_some()
    }
}

/// Emit `<w:r><w:t xml:space="preserve">value</w:t></w:r>`.
fn write_run<W: std::io::Write>(writer: &mut Writer<W>, value: &str) -> Result<(), DocxError> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    let mut wt = BytesStart::new("w:t");
    wt.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(wt))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// Rewrite `word/document.xml`, applying the cell edits between `baseline`
/// (the grid as loaded) and `current` (the grid after the fill pass).
pub(crate) fn patch_document_xml(
    xml: &str,
    baseline: &Document,
    current: &Document,
) -> Result<String, DocxError> {
    let changed = changed_cells(baseline, current);
    if changed.is_empty() {
        return Ok(xml.to_string());
    }

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());
    let mut buf = Vec::new();

    let mut w = PatchWalker {
        changed,
        tbl_depth: 0,
        table_idx: 0,
        row_idx: 0,
        cell_idx: 0,
        patch: None,
        in_wt: false,
    };

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Eof => break,

            Event::Start(e) => {
                match e.name().as_ref() {
                    b"w:tbl" => {
                        w.tbl_depth += 1;
                        if w.tbl_depth == 1 {
                            w.row_idx = 0;
                        }
                    }
                    b"w:tr" if w.tbl_depth == 1 => {
                        w.cell_idx = 0;
                    }
                    b"w:tc" if w.tbl_depth == 1 => {
                        let key = (w.table_idx, w.row_idx, w.cell_idx);
                        w.patch = w.changed.remove(&key).map(|value| CellPatch {
                            value,
                            written: false,
                        });
                    }
                    b"w:t" if w.patching() => {
                        w.in_wt = true;
                    }
                    _ => {}
                }
                writer.write_event(Event::Start(e))?;
            }

            Event::Empty(e) => match e.name().as_ref() {
                // A blank fill target is usually a self-closing paragraph;
                // expand it so the value has a run to live in.
                b"w:p" if w.tbl_depth == 1 => {
                    if let Some(patch) = w.patch.as_mut()
                        && !patch.written
                    {
                        writer.write_event(Event::Start(e.into_owned()))?;
                        write_run(&mut writer, &patch.value)?;
                        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
                        patch.written = true;
                    } else {
                        writer.write_event(Event::Empty(e))?;
                    }
                }
                // A self-closing text element cannot carry text; expand it.
                b"w:t" if w.tbl_depth == 1 => {
                    if let Some(patch) = w.patch.as_mut()
                        && !patch.written
                    {
                        let mut wt = e.into_owned();
                        if wt.try_get_attribute("xml:space").ok().flatten().is_none() {
                            wt.push_attribute(("xml:space", "preserve"));
                        }
                        writer.write_event(Event::Start(wt))?;
                        writer.write_event(Event::Text(BytesText::new(&patch.value)))?;
                        writer.write_event(Event::End(BytesEnd::new("w:t")))?;
                        patch.written = true;
                    } else {
                        writer.write_event(Event::Empty(e))?;
                    }
                }
                _ => writer.write_event(Event::Empty(e))?,
            },

            Event::Text(e) if w.in_wt => {
                if let Some(patch) = w.patch.as_mut() {
                    if !patch.written {
                        writer.write_event(Event::Text(BytesText::new(&patch.value)))?;
                        patch.written = true;
                    }
                    // Later runs of a replaced cell are blanked: drop the text.
                } else {
                    writer.write_event(Event::Text(e))?;
                }
            }

            Event::End(e) => {
                match e.name().as_ref() {
                    b"w:tbl" => {
                        if w.tbl_depth == 1 {
                            w.table_idx += 1;
                        }
                        w.tbl_depth = w.tbl_depth.saturating_sub(1);
                    }
                    b"w:tr" if w.tbl_depth == 1 => {
                        w.row_idx += 1;
                    }
                    b"w:tc" if w.tbl_depth == 1 => {
                        w.patch = None;
                        w.cell_idx += 1;
                    }
                    b"w:t" if w.in_wt => {
                        w.in_wt = false;
                        // `<w:t></w:t>` pair with no text node yet.
                        if let Some(patch) = w.patch.as_mut()
                            && !patch.written
                        {
                            writer.write_event(Event::Text(BytesText::new(&patch.value)))?;
                            patch.written = true;
                        }
                    }
                    b"w:p" if w.tbl_depth == 1 => {
                        // First paragraph of a run-less cell: inject the run
                        // before closing so the value is not lost.
                        if let Some(patch) = w.patch.as_mut()
                            && !patch.written
                        {
                            write_run(&mut writer, &patch.value)?;
                            patch.written = true;
                        }
                    }
                    _ => {}
                }
                writer.write_event(Event::End(e))?;
            }

            other => writer.write_event(other)?,
        }
        buf.clear();
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::parse_document_xml;

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{inner}<w:sectPr/></w:body></w:document>"#
        )
    }

    /// Load, apply `edit` to the grid, patch, and reload the patched XML.
    fn roundtrip(xml: &str, edit: impl FnOnce(&mut Document)) -> (String, Document) {
        let baseline = parse_document_xml(xml).unwrap();
        let mut current = baseline.clone();
        edit(&mut current);
        let patched = patch_document_xml(xml, &baseline, &current).unwrap();
        let reloaded = parse_document_xml(&patched).unwrap();
        (patched, reloaded)
    }

    #[test]
    fn unchanged_grid_returns_identical_xml() {
        let xml = body(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Juízo</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        let (patched, _) = roundtrip(&xml, |_| {});
        assert_eq!(patched, xml);
    }

    #[test]
    fn replaces_text_of_existing_run() {
        let xml = body(
            "<w:tbl><w:tr>\
             <w:tc><w:p><w:r><w:t>Juízo</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p><w:r><w:t>antigo</w:t></w:r></w:p></w:tc>\
             </w:tr></w:tbl>",
        );
        let (patched, reloaded) = roundtrip(&xml, |doc| {
            doc.tables[0].rows[0].cells[1].set_text("13ª Vara Cível");
        });
        assert_eq!(reloaded.tables[0].rows[0].cells[1].text(), "13ª Vara Cível");
        assert_eq!(reloaded.tables[0].rows[0].cells[0].text(), "Juízo");
        assert!(!patched.contains("antigo"));
    }

    #[test]
    fn injects_run_into_self_closing_paragraph() {
        let xml = body(
            "<w:tbl><w:tr>\
             <w:tc><w:p><w:r><w:t>IES</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p/></w:tc>\
             </w:tr></w:tbl>",
        );
        let (_, reloaded) = roundtrip(&xml, |doc| {
            doc.tables[0].rows[0].cells[1].set_text("Não há.");
        });
        assert_eq!(reloaded.tables[0].rows[0].cells[1].text(), "Não há.");
    }

    #[test]
    fn injects_run_into_paragraph_with_properties_only() {
        let xml = body(
            "<w:tbl><w:tr>\
             <w:tc><w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr></w:p></w:tc>\
             </w:tr></w:tbl>",
        );
        let (patched, reloaded) = roundtrip(&xml, |doc| {
            doc.tables[0].rows[0].cells[0].set_text("valor");
        });
        assert_eq!(reloaded.tables[0].rows[0].cells[0].text(), "valor");
        // Paragraph justification survives the injection.
        assert!(patched.contains("w:jc"));
    }

    #[test]
    fn blanks_extra_runs_of_replaced_cell() {
        let xml = body(
            "<w:tbl><w:tr><w:tc>\
             <w:p><w:r><w:t>Sen</w:t></w:r><w:r><w:t>tença</w:t></w:r></w:p>\
             </w:tc></w:tr></w:tbl>",
        );
        let (_, reloaded) = roundtrip(&xml, |doc| {
            doc.tables[0].rows[0].cells[0].set_text("Acórdão");
        });
        assert_eq!(reloaded.tables[0].rows[0].cells[0].text(), "Acórdão");
    }

    #[test]
    fn multi_paragraph_cell_keeps_value_in_first_text_run() {
        let xml = body(
            "<w:tbl><w:tr><w:tc>\
             <w:p><w:r><w:t>primeiro parágrafo</w:t></w:r></w:p>\
             <w:p><w:r><w:t>segundo parágrafo</w:t></w:r></w:p>\
             </w:tc></w:tr></w:tbl>",
        );
        let (patched, reloaded) = roundtrip(&xml, |doc| {
            doc.tables[0].rows[0].cells[0].set_text("Não há.");
        });
        // The value lands in the first w:t; the trailing paragraph is
        // blanked but not removed, so it reads back as an empty line.
        assert!(!patched.contains("primeiro"));
        assert!(!patched.contains("segundo"));
        assert_eq!(reloaded.tables[0].rows[0].cells[0].text(), "Não há.\n");
        assert!(!reloaded.tables[0].rows[0].cells[0].is_blank());
    }

    #[test]
    fn untouched_cells_keep_their_run_structure() {
        let xml = body(
            "<w:tbl><w:tr>\
             <w:tc><w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Par</w:t></w:r><w:r><w:t>te requerente</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p/></w:tc>\
             </w:tr></w:tbl>",
        );
        let (patched, _) = roundtrip(&xml, |doc| {
            doc.tables[0].rows[0].cells[1].set_text("Maria");
        });
        assert!(patched.contains("<w:t>Par</w:t>"));
        assert!(patched.contains("<w:t>te requerente</w:t>"));
        assert!(patched.contains("<w:b/>"));
    }

    #[test]
    fn escapes_markup_in_values() {
        let xml = body("<w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>");
        let (patched, reloaded) = roundtrip(&xml, |doc| {
            doc.tables[0].rows[0].cells[0].set_text("Custas < 500 & honorários");
        });
        assert_eq!(
            reloaded.tables[0].rows[0].cells[0].text(),
            "Custas < 500 & honorários"
        );
        assert!(patched.contains("&lt;"));
        assert!(patched.contains("&amp;"));
    }

    #[test]
    fn patches_cells_across_multiple_tables() {
        let xml = body(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        let (_, reloaded) = roundtrip(&xml, |doc| {
            doc.tables[1].rows[0].cells[0].set_text("novo");
        });
        assert_eq!(reloaded.tables[0].rows[0].cells[0].text(), "a");
        assert_eq!(reloaded.tables[1].rows[0].cells[0].text(), "novo");
    }

    #[test]
    fn nested_table_inside_changed_document_is_preserved() {
        let xml = body(
            "<w:tbl><w:tr>\
             <w:tc><w:p><w:r><w:t>outer</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             </w:tc>\
             <w:tc><w:p/></w:tc>\
             </w:tr></w:tbl>",
        );
        let (patched, reloaded) = roundtrip(&xml, |doc| {
            doc.tables[0].rows[0].cells[1].set_text("valor");
        });
        assert!(patched.contains("<w:t>inner</w:t>"));
        assert_eq!(reloaded.tables[0].rows[0].cells[1].text(), "valor");
    }
}
