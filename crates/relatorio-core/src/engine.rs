//! Single-pass table fill.
//!
//! The engine walks every cell of every table exactly once. A cell whose
//! text normalises to a known alias triggers one or more of:
//!
//! - decision-heading rename: any of the three decision headings is
//!   rewritten to the heading for the caller's report type;
//! - paired fill: the field value is written into the next cell of the
//!   same row (last cell as fallback on short rows);
//! - block fill: the field value is written into every cell of the row
//!   immediately below.
//!
//! Writes respect the blank-guard by default: a target cell that already
//! holds text is left alone, so partial re-fills and manual edits survive.
//! Unmatched labels, short rows, and label rows without a following row
//! are silently skipped; templates are allowed to contain decorative rows.

use tracing::debug;

use crate::catalog::{BlockField, FieldCatalog};
use crate::doc::Document;
use crate::input::ReportInput;
use crate::normalize::normalize_label;
use crate::report::ReportType;

/// Write-policy knobs for one fill pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillOptions {
    /// Write values even into non-blank cells. Off by default; matches the
    /// pre-blank-guard behaviour of early template revisions.
    pub overwrite: bool,
}

/// Counts of mutations performed by one pass, for boundary logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    pub paired_written: usize,
    pub block_written: usize,
    pub headings_renamed: usize,
}

/// The fill orchestrator. Holds only borrowed configuration; stateless
/// across invocations and safe to share between calls on distinct
/// documents.
pub struct FillEngine<'a> {
    catalog: &'a FieldCatalog,
    options: FillOptions,
}

impl<'a> FillEngine<'a> {
    pub fn new(catalog: &'a FieldCatalog) -> Self {
        Self {
            catalog,
            options: FillOptions::default(),
        }
    }

    pub fn with_options(catalog: &'a FieldCatalog, options: FillOptions) -> Self {
        Self { catalog, options }
    }

    /// Fill `doc` in place with the values of `input`, presenting the
    /// decision block under the heading for `report_type`.
    ///
    /// Never fails: malformed rows are handled by fallback or no-op.
    /// Report-type validation happens at the boundary, before this runs.
    pub fn fill(
        &self,
        doc: &mut Document,
        report_type: ReportType,
        input: &ReportInput,
    ) -> FillStats {
        let mut stats = FillStats::default();

        for table in &mut doc.tables {
            for r in 0..table.rows.len() {
                let width = table.rows[r].cells.len();
                for c in 0..width {
                    let key = normalize_label(table.rows[r].cells[c].text());
                    if key.is_empty() {
                        continue;
                    }

                    let block_match = self.catalog.resolve_block(&key);

                    // Decision headings are renamed to the report type's
                    // heading before any value propagation. The rename by
                    // itself never writes a value; the block match below
                    // does that.
                    if block_match == Some(BlockField::Decision) {
                        let label = report_type.decision_label();
                        let cell = &mut table.rows[r].cells[c];
                        if cell.text() != label {
                            cell.set_text(label);
                            stats.headings_renamed += 1;
                        }
                    }

                    if let Some(field) = self.catalog.resolve_paired(&key) {
                        // Next cell on the row; a short row falls back to
                        // its last cell, where the blank-guard makes the
                        // write a no-op (the label itself is not blank).
                        let target = if c + 1 < width { c + 1 } else { width - 1 };
                        let cell = &mut table.rows[r].cells[target];
                        if self.options.overwrite || cell.is_blank() {
                            cell.set_text(input.paired_value(field));
                            stats.paired_written += 1;
                        }
                    }

                    if let Some(field) = block_match
                        && r + 1 < table.rows.len()
                    {
                        let value = input.block_value(field);
                        for cell in &mut table.rows[r + 1].cells {
                            if self.options.overwrite || cell.is_blank() {
                                cell.set_text(value.clone());
                                stats.block_written += 1;
                            }
                        }
                    }
                }
            }
        }

        debug!(
            report_type = %report_type,
            paired = stats.paired_written,
            block = stats.block_written,
            renamed = stats.headings_renamed,
            "fill pass complete"
        );
        stats
    }
}

/// One-shot convenience over [`FillEngine`] with default options.
pub fn fill(
    doc: &mut Document,
    report_type: ReportType,
    input: &ReportInput,
    catalog: &FieldCatalog,
) -> FillStats {
    FillEngine::new(catalog).fill(doc, report_type, input)
}
