//! Canonical field identifiers and the alias tables that recognise them.
//!
//! Templates label the same field differently across revisions. The catalog
//! maps every known label spelling, after [`normalize_label`], onto one
//! canonical identifier. Paired and block labels live in two independent
//! namespaces: a paired label's value goes in the adjacent cell, a block
//! label's value fills the row below.

use std::collections::HashMap;

use crate::normalize::normalize_label;

/// Fields whose value belongs in the cell to the right of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairedField {
    /// Parte requerente — the claimant's name.
    Claimant,
    /// IES — the higher-education institution involved.
    Institution,
    /// N.º processo — the case docket number.
    CaseNumber,
    /// Juízo / órgão julgador — the adjudicating body.
    Court,
}

/// Fields whose value fills every cell of the row below the label's row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockField {
    /// Síntese dos fatos.
    FactsSummary,
    /// Informações — opposing-party information (legacy label "Contestação").
    Information,
    /// The decision text, shared by all three decision headings.
    Decision,
    /// Obrigação de fazer.
    ObligationToAct,
    /// Obrigação de pagar.
    ObligationToPay,
    /// Procedimento de pagamento e/ou cumprimento de obrigação.
    PaymentProcedure,
}

/// Known label spellings for paired fields, across template revisions.
///
/// Accented and unaccented variants ("Juízo"/"Juizo") collapse to the same
/// key under normalisation, so only one spelling per variant is listed.
const PAIRED_ALIASES: &[(&str, PairedField)] = &[
    ("Parte requerente", PairedField::Claimant),
    ("Parte autora", PairedField::Claimant),
    ("Requerente", PairedField::Claimant),
    ("IES", PairedField::Institution),
    ("Instituição de ensino superior", PairedField::Institution),
    ("Instituição", PairedField::Institution),
    ("N.º processo", PairedField::CaseNumber),
    ("Nº processo", PairedField::CaseNumber),
    ("N.º do processo", PairedField::CaseNumber),
    ("Nº do processo", PairedField::CaseNumber),
    ("Número do processo", PairedField::CaseNumber),
    ("Juízo", PairedField::Court),
    ("Órgão julgador", PairedField::Court),
    ("Câmara", PairedField::Court),
];

/// Known label spellings for block fields.
///
/// The three decision headings all resolve to [`BlockField::Decision`]; the
/// engine uses that to rename the heading and to pick the value source.
const BLOCK_ALIASES: &[(&str, BlockField)] = &[
    ("Síntese dos fatos", BlockField::FactsSummary),
    ("Síntese dos fatos | Inicial", BlockField::FactsSummary),
    ("Informações", BlockField::Information),
    ("Contestação", BlockField::Information),
    ("Sentença", BlockField::Decision),
    ("Acórdão", BlockField::Decision),
    ("Decisão Monocrática", BlockField::Decision),
    ("Obrigação de fazer", BlockField::ObligationToAct),
    ("Obrigação de pagar", BlockField::ObligationToPay),
    (
        "Procedimento de pagamento e/ou cumprimento de obrigação",
        BlockField::PaymentProcedure,
    ),
    ("Procedimento de pagamento", BlockField::PaymentProcedure),
];

/// Immutable alias lookup, built once at startup and shared by reference.
///
/// Lookup is exact key match on normalised text; no fuzzy or partial
/// matching.
#[derive(Debug)]
pub struct FieldCatalog {
    paired: HashMap<String, PairedField>,
    block: HashMap<String, BlockField>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        let paired = PAIRED_ALIASES
            .iter()
            .map(|(alias, field)| (normalize_label(alias), *field))
            .collect();
        let block = BLOCK_ALIASES
            .iter()
            .map(|(alias, field)| (normalize_label(alias), *field))
            .collect();
        Self { paired, block }
    }

    /// Resolve an already-normalised label in the paired namespace.
    pub fn resolve_paired(&self, normalized_label: &str) -> Option<PairedField> {
        self.paired.get(normalized_label).copied()
    }

    /// Resolve an already-normalised label in the block namespace.
    pub fn resolve_block(&self, normalized_label: &str) -> Option<BlockField> {
        self.block.get(normalized_label).copied()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::new()
    }
}
