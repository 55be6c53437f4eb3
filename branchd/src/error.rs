//! Error taxonomy shared by the store, listing service, and HTTP surface

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Required fields missing or malformed; names the offending fields
    #[error("validation failed: missing or invalid field(s): {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    /// Update/delete targeted an id that does not exist
    #[error("branch not found: {id}")]
    NotFound { id: String },

    /// Uploaded bytes are not a readable single-sheet spreadsheet
    #[error("could not decode spreadsheet: {0}")]
    Decode(String),

    /// Backing store could not be reached or failed mid-query
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

impl Error {
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
