//! Report types and the decision heading they select.
//!
//! The decision block appears in templates under one of three mutually
//! exclusive headings ("Sentença", "Acórdão", "Decisão Monocrática").
//! The heading shown depends on the report type; the value always comes
//! from the single decision field regardless of which heading the
//! template happens to carry.

use std::fmt;
use std::str::FromStr;

use crate::error::FillError;

/// Closed set of report types accepted at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportType {
    #[default]
    Sentenca,
    Acordo,
    MsSentenca,
    Acordao,
    DecisaoMonocratica,
}

impl ReportType {
    pub const ALL: &[ReportType] = &[
        ReportType::Sentenca,
        ReportType::Acordo,
        ReportType::MsSentenca,
        ReportType::Acordao,
        ReportType::DecisaoMonocratica,
    ];

    /// The wire/CLI identifier for this report type.
    pub fn slug(self) -> &'static str {
        match self {
            ReportType::Sentenca => "sentenca",
            ReportType::Acordo => "acordo",
            ReportType::MsSentenca => "ms_sentenca",
            ReportType::Acordao => "acordao",
            ReportType::DecisaoMonocratica => "decisao_monocratica",
        }
    }

    /// Display heading written over any decision-label cell in the template.
    pub fn decision_label(self) -> &'static str {
        match self {
            ReportType::Sentenca | ReportType::Acordo | ReportType::MsSentenca => "Sentença",
            ReportType::Acordao => "Acórdão",
            ReportType::DecisaoMonocratica => "Decisão Monocrática",
        }
    }

    /// Lenient parse used by legacy callers: unknown or empty input falls
    /// back to [`ReportType::Sentenca`] instead of failing.
    ///
    /// New code should prefer [`FromStr`], which rejects unknown types.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for ReportType {
    type Err = FillError;

    /// Case-insensitive match against the closed slug set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sentenca" => Ok(ReportType::Sentenca),
            "acordo" => Ok(ReportType::Acordo),
            "ms_sentenca" => Ok(ReportType::MsSentenca),
            "acordao" => Ok(ReportType::Acordao),
            "decisao_monocratica" => Ok(ReportType::DecisaoMonocratica),
            _ => Err(FillError::UnknownReportType(s.to_string())),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
