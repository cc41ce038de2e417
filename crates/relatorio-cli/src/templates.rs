//! Template selection: maps a report type to its official model file.

use std::path::{Path, PathBuf};

use anyhow::bail;
use relatorio_core::ReportType;

/// Official model file for each report type.
pub fn template_file_name(report_type: ReportType) -> &'static str {
    match report_type {
        ReportType::Sentenca => "MODELO_RELATORIO_SENTENCA.docx",
        ReportType::Acordo => "MODELO_RELATORIO_ACORDO.docx",
        ReportType::MsSentenca => "MODELO_RELATORIO_MS_SENTENCA.docx",
        ReportType::Acordao => "MODELO_RELATORIO_ACORDAO.docx",
        ReportType::DecisaoMonocratica => "MODELO_RELATORIO_DECISAO_MONOCRATICA.docx",
    }
}

/// Resolve the template path for a report type, verifying it exists before
/// the fill engine runs.
pub fn resolve(templates_dir: &Path, report_type: ReportType) -> anyhow::Result<PathBuf> {
    let path = templates_dir.join(template_file_name(report_type));
    if !path.is_file() {
        bail!(
            "template not found for report type '{report_type}': {}",
            path.display()
        );
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn every_report_type_has_a_distinct_model_file() {
        let names: std::collections::HashSet<&str> = ReportType::ALL
            .iter()
            .map(|rt| template_file_name(*rt))
            .collect();
        assert_eq!(names.len(), ReportType::ALL.len());
    }

    #[test]
    fn resolve_finds_existing_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MODELO_RELATORIO_ACORDAO.docx");
        fs::write(&path, b"stub").unwrap();

        let resolved = resolve(dir.path(), ReportType::Acordao).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn resolve_fails_before_fill_when_template_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(dir.path(), ReportType::Sentenca).unwrap_err();
        assert!(err.to_string().contains("template not found"));
        assert!(err.to_string().contains("sentenca"));
    }
}
