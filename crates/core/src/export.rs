//! Plain-text export of a transcript.
use crate::transcript::Transcript;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument, warn};

pub const DOWNLOAD_FILE_NAME: &str = "chat_log.txt";
pub const DOWNLOAD_MIME_TYPE: &str = "text/plain";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create export directory {0}: {1}")]
    CreateDir(PathBuf, #[source] std::io::Error),
    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Result of saving a transcript to disk.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing to save; no file was written.
    Empty,
    Saved(PathBuf),
}

/// An in-memory transcript file offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub data: String,
}

/// Formats every message as `role: content`, one per line, without a trailing newline.
pub fn format_transcript(transcript: &Transcript) -> String {
    transcript
        .all()
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn download(transcript: &Transcript) -> Download {
    Download {
        file_name: DOWNLOAD_FILE_NAME,
        mime_type: DOWNLOAD_MIME_TYPE,
        data: format_transcript(transcript),
    }
}

/// Writes a download artifact into `dir` under its own file name.
pub fn write_download(artifact: &Download, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(artifact.file_name);
    fs::write(&path, artifact.data.as_bytes()).map_err(|e| ExportError::Write(path.clone(), e))?;
    info!(path = %path.display(), "Wrote transcript download");
    Ok(path)
}

/// File name for a transcript saved at `now`, e.g. `chat_20240925_101500.txt`.
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("chat_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Saves the transcript to a timestamped file in `dir`, creating `dir` if needed.
///
/// An existing file with the same name is truncated and replaced.
pub fn save_to_disk(transcript: &Transcript, dir: &Path) -> Result<SaveOutcome, ExportError> {
    save_to_disk_at(transcript, dir, Local::now())
}

/// [`save_to_disk`] with the file name stamped from `now`.
#[instrument(skip(transcript, now), fields(messages = transcript.len()))]
pub fn save_to_disk_at(
    transcript: &Transcript,
    dir: &Path,
    now: DateTime<Local>,
) -> Result<SaveOutcome, ExportError> {
    if transcript.is_empty() {
        warn!("No chat messages to save");
        return Ok(SaveOutcome::Empty);
    }

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ExportError::CreateDir(dir.to_path_buf(), e))?;
    }

    let path = dir.join(export_file_name(now));
    let content: String = transcript
        .all()
        .iter()
        .map(|msg| format!("{}: {}\n", msg.role, msg.content))
        .collect();
    fs::write(&path, content).map_err(|e| ExportError::Write(path.clone(), e))?;

    info!(path = %path.display(), "Chat saved");
    Ok(SaveOutcome::Saved(path))
}
