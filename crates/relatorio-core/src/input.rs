//! Caller-supplied field values for one fill operation.
//!
//! Field names follow the original caller schema and are kept stable for
//! wire compatibility; all fields are optional. The record is immutable
//! for the duration of a fill.

use serde::{Deserialize, Serialize};

use crate::catalog::{BlockField, PairedField};

/// Written wherever the caller supplied no usable value.
pub const EMPTY_PLACEHOLDER: &str = "Não há.";

/// One report's worth of input values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportInput {
    /// Report type selector (slug, e.g. "sentenca"). Validated at the
    /// boundary, not here.
    pub tipo: Option<String>,
    pub parte_requerente: Option<String>,
    pub ies: Option<String>,
    pub numero_processo: Option<String>,
    pub juizo: Option<String>,
    pub sintese: Option<String>,
    /// Legacy field name; used only as a fallback source for `informacoes`.
    pub contestacao: Option<String>,
    pub informacoes: Option<String>,
    pub decisao: Option<String>,
    pub obrig_fazer: Option<String>,
    pub obrig_pagar: Option<String>,
    pub procedimento: Option<String>,
}

/// Trimmed value if non-empty after trimming, otherwise `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl ReportInput {
    /// Value for a paired field, placeholder-substituted.
    pub fn paired_value(&self, field: PairedField) -> String {
        let raw = match field {
            PairedField::Claimant => &self.parte_requerente,
            PairedField::Institution => &self.ies,
            PairedField::CaseNumber => &self.numero_processo,
            PairedField::Court => &self.juizo,
        };
        present(raw).unwrap_or(EMPTY_PLACEHOLDER).to_string()
    }

    /// Value for a block field, placeholder-substituted.
    ///
    /// The information block honours both schema generations: `informacoes`
    /// first, then the legacy `contestacao`, then the placeholder.
    pub fn block_value(&self, field: BlockField) -> String {
        let raw = match field {
            BlockField::FactsSummary => &self.sintese,
            BlockField::Information => {
                return present(&self.informacoes)
                    .or_else(|| present(&self.contestacao))
                    .unwrap_or(EMPTY_PLACEHOLDER)
                    .to_string();
            }
            BlockField::Decision => &self.decisao,
            BlockField::ObligationToAct => &self.obrig_fazer,
            BlockField::ObligationToPay => &self.obrig_pagar,
            BlockField::PaymentProcedure => &self.procedimento,
        };
        present(raw).unwrap_or(EMPTY_PLACEHOLDER).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_trimmed() {
        let input = ReportInput {
            parte_requerente: Some("  Maria da Silva  ".into()),
            ..Default::default()
        };
        assert_eq!(input.paired_value(PairedField::Claimant), "Maria da Silva");
    }

    #[test]
    fn missing_and_whitespace_only_become_placeholder() {
        let input = ReportInput {
            juizo: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(input.paired_value(PairedField::Institution), EMPTY_PLACEHOLDER);
        assert_eq!(input.paired_value(PairedField::Court), EMPTY_PLACEHOLDER);
        assert_eq!(input.block_value(BlockField::Decision), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn information_prefers_informacoes() {
        let input = ReportInput {
            informacoes: Some("Defesa apresentada.".into()),
            contestacao: Some("Contestação antiga.".into()),
            ..Default::default()
        };
        assert_eq!(
            input.block_value(BlockField::Information),
            "Defesa apresentada."
        );
    }

    #[test]
    fn information_falls_back_to_contestacao() {
        let input = ReportInput {
            informacoes: Some("   ".into()),
            contestacao: Some("  Contestação protocolada em 2023.  ".into()),
            ..Default::default()
        };
        assert_eq!(
            input.block_value(BlockField::Information),
            "Contestação protocolada em 2023."
        );
    }

    #[test]
    fn information_placeholder_when_both_blank() {
        let input = ReportInput::default();
        assert_eq!(input.block_value(BlockField::Information), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn deserializes_original_caller_schema() {
        let json = r#"{
            "tipo": "sentenca",
            "parte_requerente": "Caroline Felix dos Santos",
            "numero_processo": "1105335-48.2024.8.26.0002",
            "decisao": "Julgo procedente o pedido."
        }"#;
        let input: ReportInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.tipo.as_deref(), Some("sentenca"));
        assert_eq!(
            input.paired_value(PairedField::Claimant),
            "Caroline Felix dos Santos"
        );
        assert_eq!(input.ies, None);
        assert_eq!(input.paired_value(PairedField::Institution), EMPTY_PLACEHOLDER);
    }
}
