use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum StorageError {
    Io { path: String, message: String },
    BadFileName(String),
    Parse { path: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { path, message } => write!(f, "I/O error on {path}: {message}"),
            StorageError::BadFileName(name) => {
                write!(f, "'{name}' is not a dated snapshot file name")
            }
            StorageError::Parse { path, message } => {
                write!(f, "could not parse snapshot {path}: {message}")
            }
        }
    }
}

impl Error for StorageError {}
