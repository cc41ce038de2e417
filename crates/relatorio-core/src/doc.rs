//! In-memory table grid mutated by the fill engine.
//!
//! A [`Document`] is an ordered sequence of tables; a table is rows of
//! cells. The grid is produced by a template-loading collaborator (the
//! docx crate, or test fixtures) and mutated in place: the engine only
//! rewrites cell text, never inserts or reorders rows and cells.

use crate::normalize::is_blank;

/// A mutable text container. Identity is positional (table, row, column).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    text: String,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Blank-guard test: whitespace-only content counts as blank.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }
}

/// An ordered sequence of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::new).collect(),
        }
    }
}

/// An ordered sequence of rows. Row and cell order is fixed by the template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn from_grid<I, R, S>(grid: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: grid.into_iter().map(Row::from_texts).collect(),
        }
    }
}

/// An ordered sequence of tables, externally owned and filled in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub tables: Vec<Table>,
}

impl Document {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Convenience for tests and fixtures: one table from a text grid.
    pub fn single_table<I, R, S>(grid: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: vec![Table::from_grid(grid)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_roundtrip() {
        let mut cell = Cell::new("Parte requerente");
        assert_eq!(cell.text(), "Parte requerente");
        cell.set_text("Maria");
        assert_eq!(cell.text(), "Maria");
    }

    #[test]
    fn cell_blankness() {
        assert!(Cell::new("").is_blank());
        assert!(Cell::new("  \t").is_blank());
        assert!(!Cell::new("Juízo").is_blank());
    }

    #[test]
    fn grid_construction_preserves_order() {
        let doc = Document::single_table([["a", "b"], ["c", "d"]]);
        let table = &doc.tables[0];
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells[1].text(), "b");
        assert_eq!(table.rows[1].cells[0].text(), "c");
    }
}
