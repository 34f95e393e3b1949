use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScrapeError {
    Network(String),
    Io(String),
    HtmlParse(String),
    MissingStateScript,
    JsonParse(String),
    UnexpectedShape(String),
    InvalidValue(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Network(msg) => write!(f, "Network error: {msg}"),
            ScrapeError::Io(msg) => write!(f, "I/O error: {msg}"),
            ScrapeError::HtmlParse(msg) => write!(f, "HTML parse error: {msg}"),
            ScrapeError::MissingStateScript => write!(f, "embedded page state not found"),
            ScrapeError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            ScrapeError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
            ScrapeError::InvalidValue(msg) => write!(f, "Invalid field value: {msg}"),
        }
    }
}

impl Error for ScrapeError {}
