use std::path::{Path, PathBuf};

use super::domain::DownloadLogEntry;

/// Outbound download/visit log (owned by the surrounding CRUD application).
pub trait DownloadLogger: Send + Sync {
    fn log(&self, entry: DownloadLogEntry) -> Result<(), DownloadLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadLogError {
    #[error("download log unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the current multi-page certificate source document.
pub trait SourceDocumentProvider: Send + Sync {
    fn load(&self) -> Result<Vec<u8>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read certificate source {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("certificate source unavailable: {0}")]
    Unavailable(String),
}

/// Source document read from disk on every request, so a replaced file is picked up
/// without a restart.
#[derive(Debug, Clone)]
pub struct FileSourceDocument {
    path: PathBuf,
}

impl FileSourceDocument {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceDocumentProvider for FileSourceDocument {
    fn load(&self) -> Result<Vec<u8>, SourceError> {
        std::fs::read(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Source document held in memory.
impl SourceDocumentProvider for Vec<u8> {
    fn load(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.clone())
    }
}
