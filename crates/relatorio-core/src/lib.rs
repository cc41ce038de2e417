//! Field resolution and table fill engine for legal report templates.
//!
//! Recognises labelled cells in a table grid despite casing, accent, and
//! wording variants, then writes caller-supplied values either into the
//! adjacent cell (paired fields) or into the row below (block fields),
//! renaming the decision heading to match the report type.

pub mod catalog;
pub mod doc;
pub mod engine;
pub mod error;
pub mod input;
pub mod normalize;
pub mod report;

pub use catalog::{BlockField, FieldCatalog, PairedField};
pub use doc::{Cell, Document, Row, Table};
pub use engine::{FillEngine, FillOptions, FillStats, fill};
pub use error::FillError;
pub use input::{EMPTY_PLACEHOLDER, ReportInput};
pub use normalize::normalize_label;
pub use report::ReportType;
