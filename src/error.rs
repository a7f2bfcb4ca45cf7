use std::{io, path::PathBuf};

use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Unable to read manifest {path:?}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to parse manifest {path:?}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    MissingCredential(String),
    #[error("Error sending request: {0}")]
    Network(#[from] ureq::Error),
    #[error(transparent)]
    IoError(#[from] io::Error),
    #[error("Error parsing JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{0}")]
    MiscError(String),
}

impl FetchError {
    /// Whether the error should end the whole run rather than just the current step
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FetchError::ManifestRead { .. } | FetchError::ManifestParse { .. }
        )
    }
}

/// Pass fatal errors on, log anything else under `context` and carry on with `None`
pub fn tolerate<T>(context: &str, res: Result<T, FetchError>) -> Result<Option<T>, FetchError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            error!("{context}: {e}");
            Ok(None)
        }
    }
}
