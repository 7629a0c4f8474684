//! In-memory ZIP archive assembly.

use std::io::{Cursor, Write};

use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Errors that can occur while serializing an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Failed to add archive entry '{name}': {reason}")]
    Entry { name: String, reason: String },

    #[error("Failed to finalize archive: {0}")]
    Finalize(String),
}

/// Named binary entries collected during a batch and serialized once.
///
/// Entries keep insertion order. Inserting a name that is already present
/// replaces the earlier bytes in place.
#[derive(Debug, Default)]
pub struct ArchiveBundle {
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the bytes it replaced if the name was taken.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Option<Vec<u8>> {
        let name = name.into();

        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            tracing::warn!(entry = %name, "Archive entry replaced");
            return Some(std::mem::replace(existing, bytes));
        }

        self.entries.push((name, bytes));
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes every entry into one deflate-compressed ZIP blob.
    ///
    /// An empty bundle produces a valid archive with zero entries.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] if the writer rejects an entry or cannot
    /// write the central directory.
    pub fn finish(self) -> Result<Vec<u8>, ArchiveError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in &self.entries {
            zip.start_file(name.as_str(), options)
                .map_err(|e| ArchiveError::Entry {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            zip.write_all(bytes).map_err(|e| ArchiveError::Entry {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| ArchiveError::Finalize(e.to_string()))?;

        Ok(cursor.into_inner())
    }
}
