use std::error::Error as StdError;
use std::fmt;
use std::result::Result as StdResult;

use serde_json::Error as JsonError;

pub type Result<T> = StdResult<T, Error>;

/// Error raised by a training callback, passed through untouched.
pub type CallbackError = Box<dyn StdError + Send + Sync>;

#[derive(Debug)]
pub enum Error {
    /// feature and label sequences differ in length
    LengthMismatch { features: usize, labels: usize },
    /// fold count below one
    InvalidFoldCount(usize),
    /// injected ordering is not a permutation of the requested size
    InvalidPermutation(String),
    /// a split table names a repeat or fold that cannot exist
    InvalidSplitTable(String),
    /// a split refers to a row the data set does not have
    IndexOutOfBounds { index: usize, len: usize },
    /// the training callback failed
    Callback(CallbackError),
    JsonError(JsonError),
}

impl Error {
    /// true for every error caused by malformed arguments, as opposed to failures while running
    pub fn is_invalid_input(&self) -> bool {
        match *self {
            Error::LengthMismatch { .. }
            | Error::InvalidFoldCount(_)
            | Error::InvalidPermutation(_)
            | Error::InvalidSplitTable(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::LengthMismatch { features, labels } => write!(
                f,
                "{} feature records but {} labels",
                features, labels
            ),
            Error::InvalidFoldCount(k) => write!(f, "invalid fold count {} (need at least 1)", k),
            Error::InvalidPermutation(ref msg) => write!(f, "invalid permutation: {}", msg),
            Error::InvalidSplitTable(ref msg) => write!(f, "invalid split table: {}", msg),
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "row {} out of bounds for data set of {} rows", index, len)
            }
            Error::Callback(ref e) => write!(f, "training callback failed: {}", e),
            Error::JsonError(ref e) => write!(f, "{}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Callback(ref e) => Some(&**e),
            Error::JsonError(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Self {
        Error::JsonError(e)
    }
}

#[test]
fn invalid_input_family() {
    assert!(Error::LengthMismatch { features: 3, labels: 2 }.is_invalid_input());
    assert!(Error::InvalidFoldCount(0).is_invalid_input());
    assert!(Error::InvalidPermutation("dup".to_owned()).is_invalid_input());
    assert!(Error::InvalidSplitTable("fold 9".to_owned()).is_invalid_input());
    assert!(!Error::IndexOutOfBounds { index: 7, len: 3 }.is_invalid_input());
    assert!(!Error::Callback("boom".into()).is_invalid_input());
}

#[test]
fn callback_error_is_source() {
    let e = Error::Callback("model diverged".into());
    assert_eq!(e.to_string(), "training callback failed: model diverged");
    assert_eq!(e.source().unwrap().to_string(), "model diverged");
}
