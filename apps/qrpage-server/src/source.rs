//! File-backed implementation of the `PayloadSource` port

use std::future::Future;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use qrpage_domain::{paging::PagingError, ports::PayloadSource};
use tracing::{error, info, instrument};

/// Reads the whole payload from a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PayloadSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read(&self) -> impl Future<Output = Result<Bytes, PagingError>> + Send {
        let path = self.path.clone();

        async move {
            if path.as_os_str().to_string_lossy().trim().is_empty() {
                return Err(PagingError::source_unavailable("no file path provided"));
            }

            match tokio::fs::read(&path).await {
                Ok(data) => {
                    info!(path = %path.display(), size = data.len(), "Loaded payload");
                    Ok(Bytes::from(data))
                }
                Err(err) => {
                    error!(path = %path.display(), error = %err, "Failed to read payload");
                    Err(PagingError::source_unavailable(format!(
                        "opening file '{}': {}",
                        path.display(),
                        err
                    )))
                }
            }
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
