//! Saving exported timetables (PDF/CSV) shipped as base64 payloads.

pub(crate) mod commands;

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::info;
use serde::Serialize;

use crate::error::{Error, Result};

/// A file written to the user's download directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedArtifact {
    pub path: PathBuf,
    pub filename: String,
    pub mime_type: String,
    pub bytes: usize,
}

/// Decodes transport payloads and writes them to disk. One attempt per
/// call; a failed save surfaces as an error and leaves nothing behind.
#[derive(Clone)]
pub struct ArtifactDownloader {
    dir: PathBuf,
}

impl ArtifactDownloader {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode `encoded` and save it as `filename`. The write goes
    /// through a `.part` file renamed into place, and the temp file is
    /// removed again if any step fails.
    pub fn save(&self, encoded: &str, filename: &str, mime_type: &str) -> Result<SavedArtifact> {
        let filename = sanitize_filename(filename)?;
        let bytes = STANDARD.decode(encoded.trim())?;

        fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(&filename);
        let partial = self.dir.join(format!("{filename}.part"));

        fs::write(&partial, &bytes)
            .and_then(|_| fs::rename(&partial, &target))
            .map_err(|err| {
                let _ = fs::remove_file(&partial);
                Error::Io(err)
            })?;

        info!("saved {} ({} bytes) to {}", filename, bytes.len(), target.display());

        Ok(SavedArtifact {
            path: target,
            filename,
            mime_type: mime_type.to_string(),
            bytes: bytes.len(),
        })
    }
}

/// Exports are saved under their server-provided name; anything that
/// would escape the download directory is rejected.
fn sanitize_filename(filename: &str) -> Result<String> {
    let filename = filename.trim();
    if filename.is_empty() {
        return Err(Error::validation("artifact filename must not be empty"));
    }
    if filename.contains(['/', '\\']) || filename.contains("..") {
        return Err(Error::validation(format!(
            "artifact filename '{filename}' is not a plain file name"
        )));
    }
    Ok(filename.to_string())
}
