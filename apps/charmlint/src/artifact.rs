//! Opening a packaged charm.
//!
//! The archive is extracted into a temporary directory that lives as long as
//! the returned `ExtractedArtifact`; dropping it removes the tree.

use crate::error::AnalyzeError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// An extracted charm tree, removed on drop.
pub struct ExtractedArtifact {
    source: PathBuf,
    dir: TempDir,
}

impl ExtractedArtifact {
    /// Root of the extracted tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Archive this tree was extracted from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Validate that `path` points to an existing regular file.
pub fn useful_filepath(path: &Path) -> Result<PathBuf, AnalyzeError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(path.to_path_buf()),
        _ => Err(AnalyzeError::InaccessibleFile {
            path: path.to_path_buf(),
        }),
    }
}

/// Extract the charm archive at `path` into a fresh temporary directory.
pub fn open_artifact(path: &Path) -> Result<ExtractedArtifact, AnalyzeError> {
    let unreadable = |cause: String| AnalyzeError::ArtifactUnreadable {
        path: path.to_path_buf(),
        cause,
    };
    let file = fs::File::open(path).map_err(|e| unreadable(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| unreadable(e.to_string()))?;
    let dir = tempfile::Builder::new()
        .prefix("charmlint-")
        .tempdir()
        .map_err(|e| unreadable(e.to_string()))?;
    archive
        .extract(dir.path())
        .map_err(|e| unreadable(e.to_string()))?;
    log::debug!(
        "Extracted {} entries from {} into {}",
        archive.len(),
        path.display(),
        dir.path().display()
    );
    Ok(ExtractedArtifact {
        source: path.to_path_buf(),
        dir,
    })
}
