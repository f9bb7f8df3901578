use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a publication list from being regenerated.
///
/// None of these are recoverable within a run: the binary reports the error and
/// exits non-zero, leaving any previously generated output in place.
#[derive(Error, Debug)]
pub enum Error {
    #[error("ZOTERO_USER_ID environment variable is required.")]
    MissingUserId,

    #[error("invalid Zotero API URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Error fetching from Zotero API: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("request to Zotero API failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("malformed response from Zotero API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No items found. {} not updated.", .path.display())]
    NoItems { path: PathBuf },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
