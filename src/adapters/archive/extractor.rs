//! ZIP extraction for downloaded export files

use crate::domain::{QualtricsError, Result};
use async_trait::async_trait;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use tokio::task;
use zip::ZipArchive;

/// Unpacks an export archive onto disk
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    /// Extract `archive` into `destination`, returning the written file paths
    async fn extract(&self, archive: Vec<u8>, destination: &Path) -> Result<Vec<PathBuf>>;
}

/// [`ArchiveExtractor`] for ZIP archives
///
/// Existing files are overwritten. Entries whose names would resolve outside
/// the destination are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArchiveExtractor for ZipExtractor {
    async fn extract(&self, archive: Vec<u8>, destination: &Path) -> Result<Vec<PathBuf>> {
        let destination = destination.to_path_buf();

        task::spawn_blocking(move || extract_zip(&archive, &destination))
            .await
            .map_err(|e| QualtricsError::Archive(format!("Extraction task failed: {e}")))?
    }
}

fn extract_zip(archive: &[u8], destination: &Path) -> Result<Vec<PathBuf>> {
    let mut zip = ZipArchive::new(Cursor::new(archive))
        .map_err(|e| QualtricsError::Archive(format!("Failed to read export archive: {e}")))?;

    fs::create_dir_all(destination).map_err(|e| {
        QualtricsError::Io(format!(
            "Failed to create destination {}: {e}",
            destination.display()
        ))
    })?;

    let mut extracted = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;

        let relative = entry.enclosed_name().map(Path::to_path_buf).ok_or_else(|| {
            QualtricsError::Archive(format!(
                "Archive entry '{}' escapes the destination directory",
                entry.name()
            ))
        })?;
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(&target)?;
        io::copy(&mut entry, &mut file)?;

        tracing::debug!(path = %target.display(), bytes = entry.size(), "Extracted file");
        extracted.push(target);
    }

    Ok(extracted)
}
