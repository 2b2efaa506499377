//! File payload sources for upload calls.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{IdswyftError, Result};

/// MIME type attached to every uploaded file part.
pub const UPLOAD_MIME: &str = "application/octet-stream";

/// A file payload for a document, selfie, or back-of-ID upload.
///
/// Whatever the source, the content is read fully and synchronously into
/// memory when the request is built, then discarded. An unreadable source is
/// an [`InvalidFile`](IdswyftError::InvalidFile) error raised before any
/// network call is made.
pub enum FileSource {
    /// Path to a file on disk.
    Path(PathBuf),
    /// Raw bytes, used as-is.
    Bytes(Vec<u8>),
    /// An open readable stream, drained to the end.
    Reader(Box<dyn Read + Send>),
}

impl FileSource {
    /// Wrap an arbitrary reader.
    pub fn reader(reader: impl Read + Send + 'static) -> Self {
        Self::Reader(Box::new(reader))
    }

    /// Normalize the source into a single byte buffer.
    pub(crate) fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::Path(path) => fs::read(&path).map_err(|e| {
                IdswyftError::InvalidFile(format!("Failed to read {}: {e}", path.display()))
            }),
            Self::Bytes(bytes) => Ok(bytes),
            Self::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .map_err(|e| IdswyftError::InvalidFile(format!("Failed to read stream: {e}")))?;
                Ok(buf)
            }
        }
    }
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for FileSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for FileSource {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for FileSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for FileSource {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}
