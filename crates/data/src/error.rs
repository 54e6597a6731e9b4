use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io;

/// The error type for loading and normalizing the visualization resources.
///
/// Errors originate from I/O reads, JSON deserialization and date parsing.
#[derive(Debug)]
pub enum DataError {
    /// A [`std::io::Error`] encountered while reading a resource file.
    Io(io::Error),

    /// A [`serde_json::Error`] encountered while deserializing a resource.
    Json(serde_json::Error),

    /// A [`chrono::ParseError`] encountered while parsing a record date.
    Date {
        raw_date: String,
        error: chrono::ParseError,
    },
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let data_error = "data error:";

        match self {
            DataError::Io(error) => write!(f, "{data_error} I/O error: {error}"),
            DataError::Json(error) => {
                write!(f, "{data_error} JSON deserialization error: {error}")
            }
            DataError::Date { raw_date, error } => write!(
                f,
                "{data_error} could not parse the record date \"{raw_date}\": {error}"
            ),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataError::Io(error) => Some(error),
            DataError::Json(error) => Some(error),
            DataError::Date { error, .. } => Some(error),
        }
    }
}

impl From<io::Error> for DataError {
    fn from(error: io::Error) -> Self {
        DataError::Io(error)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(error: serde_json::Error) -> Self {
        DataError::Json(error)
    }
}
