use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed document xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("missing archive part: {0}")]
    MissingPart(&'static str),

    #[error("archive part is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}
