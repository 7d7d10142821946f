//! Local PDF directory
//!
//! The service only ever reads from `pdfDir`; files are placed there by
//! other means. Every name that reaches the filesystem goes through
//! [`is_safe_filename`] first.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to create PDF directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("PDF file not found")]
    NotFound,

    #[error("failed to open PDF file: {0}")]
    Io(#[source] io::Error),
}

/// Rejects names that could escape the PDF directory
///
/// A safe name contains no `..`, no path separator (`/` or `\`) and no NUL byte.
pub fn is_safe_filename(name: &str) -> bool {
    !name.contains("..") && !name.contains('/') && !name.contains('\\') && !name.contains('\0')
}

/// Creates the PDF directory (and parents) with mode `0755`
///
/// Failing here is fatal for the service.
pub fn init_store(dir: &Path) -> Result<PdfStore, StoreError> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    Ok(PdfStore::new(dir))
}

/// File-store adapter over the PDF directory
#[derive(Debug, Clone)]
pub struct PdfStore {
    dir: PathBuf,
}

impl PdfStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{pdfDir}/{documentId}.pdf`, or `None` for an unsafe id
    pub fn resolve_path(&self, document_id: &str) -> Option<PathBuf> {
        self.path_for(&format!("{}.pdf", document_id))
    }

    /// `{pdfDir}/{filename}`, or `None` for an unsafe name
    pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
        is_safe_filename(filename).then(|| self.dir.join(filename))
    }

    /// True only for an existing regular file
    pub async fn exists(&self, path: &Path) -> bool {
        match tokio::fs::metadata(path).await {
            Ok(meta) => meta.is_file(),
            Err(_) => false,
        }
    }

    pub async fn open(&self, path: &Path) -> Result<File, StoreError> {
        File::open(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })
    }
}
