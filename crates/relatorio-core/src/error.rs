use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
    #[error(
        "unknown report type: {0:?} (expected one of: sentenca, acordo, ms_sentenca, acordao, decisao_monocratica)"
    )]
    UnknownReportType(String),
}
