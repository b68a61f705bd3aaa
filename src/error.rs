/// Error types shared by the caption core and the settings store.
///
/// Nothing here is fatal: the application shell logs every error and shows it
/// in the status line, then carries on.
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while scanning, reading or writing captions
#[derive(Error, Debug)]
pub enum CaptionerError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Folder is not readable: {path}")]
    FolderUnreadable { path: PathBuf },

    #[error("Image no longer exists: {path}")]
    ImageMissing { path: PathBuf },

    #[error("No entry at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No folder is open")]
    NoFolder,

    #[error("No image is selected")]
    NoSelection,

    #[error("Settings store error: {0}")]
    Settings(#[from] rusqlite::Error),

    #[error("Settings value could not be encoded: {0}")]
    SettingsValue(#[from] serde_json::Error),

    #[error("Could not determine user data directory")]
    NoDataDir,
}

impl CaptionerError {
    /// Attach the offending path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CaptionerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CaptionerError>;
