//! `--verbose` file logging.
use anyhow::{Context, Result};
use ochat_core::get_log_dir;
use std::fs::{self, File, OpenOptions};
use std::io::LineWriter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::OffsetTime;

const LOG_FILE: &str = "ochat.log";
const ROTATE_ABOVE_BYTES: u64 = 100 * 1024;
const DEFAULT_FILTER: &str = "ochat=debug,ochat_core=debug,rustyline=info";

/// Opens `<dir>/ochat.log` for appending. A log over `max_bytes` is first
/// moved to `ochat.log.old`, replacing the previous one.
fn open_log_file(dir: &Path, max_bytes: u64) -> Result<(File, PathBuf)> {
    let path = dir.join(LOG_FILE);
    let too_big = fs::metadata(&path).is_ok_and(|m| m.len() > max_bytes);
    if too_big {
        // rename replaces an existing backup
        fs::rename(&path, path.with_extension("log.old"))
            .with_context(|| format!("Failed to rotate {}", path.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok((file, path))
}

/// Sends ochat's traces to the log file. `RUST_LOG` overrides the filter.
pub fn setup_logging() -> Result<()> {
    let log_dir = get_log_dir().context("Failed to get log directory")?;
    let (file, _) = open_log_file(&log_dir, ROTATE_ABOVE_BYTES)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(LineWriter::new(file)))
        .with_ansi(false)
        .with_timer(OffsetTime::local_rfc_3339()?)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_appends_small_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LOG_FILE), "first\n").unwrap();

        let (mut file, path) = open_log_file(dir.path(), 1024).unwrap();
        writeln!(file, "second").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
        assert!(!dir.path().join("ochat.log.old").exists());
    }

    #[test]
    fn test_open_log_file_rotates_large_log() {
        let dir = tempfile::tempdir().unwrap();
        let big = "x".repeat(64);
        fs::write(dir.path().join(LOG_FILE), &big).unwrap();
        fs::write(dir.path().join("ochat.log.old"), "stale").unwrap();

        let (_, path) = open_log_file(dir.path(), 32).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "");
        assert_eq!(
            fs::read_to_string(dir.path().join("ochat.log.old")).unwrap(),
            big
        );
    }
}
