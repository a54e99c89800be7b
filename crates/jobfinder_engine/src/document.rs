use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::DocumentUpload;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("not a file: {0}")]
    NotAFile(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Read a document from disk for upload. Type and size are not checked here;
/// the Analysis Service decides what it accepts.
pub fn read_document(path: &Path) -> Result<DocumentUpload, DocumentError> {
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Err(DocumentError::NotAFile(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(DocumentUpload { file_name, bytes })
}
