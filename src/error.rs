use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup failures
// ---------------------------------------------------------------------------

/// Everything that can abort a session before or while the window is open.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{0}'")]
    MissingColumn(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl SessionError {
    /// Map an I/O error on `path` to `FileNotFound` when appropriate.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            SessionError::FileNotFound { path, source }
        } else {
            SessionError::Unexpected(
                anyhow::Error::new(source).context(format!("opening {}", path.display())),
            )
        }
    }

    /// The line printed to the console when the session aborts.
    pub fn console_message(&self) -> String {
        match self {
            SessionError::FileNotFound { .. } => format!(
                "Error: File not found. Please ensure the file exists at the specified path. {self}"
            ),
            SessionError::MissingColumn(_) => {
                format!("Error: Missing expected column in the dataset. {self}")
            }
            SessionError::Unexpected(e) => format!("An unexpected error occurred: {e:#}"),
        }
    }
}
