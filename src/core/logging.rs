//! Structured logging setup
//!
//! Records are JSON lines appended to a log file. In debug mode they are also
//! mirrored to stderr, so stdout stays free for the rendered report.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter (`RUST_LOG` syntax)
pub const LOG_FILTER_ENV: &str = "QUICKOPEN_LOG";

/// `~/.quickopen/quickopen.log`, if a home directory is known
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quickopen").join("quickopen.log"))
}

/// Open the log file for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create log directory: {}", parent.display())
            })?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }))
}

/// Install the global subscriber.
///
/// Logging problems never abort the run: an unusable log file or an already
/// installed subscriber only produce a warning on stderr.
pub fn init(debug: bool, log_file: Option<&Path>) {
    let file = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("warning: {:#}; continuing without a log file", e);
            None
        }
    });

    let builder = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter(debug))
        .with_file(true)
        .with_line_number(true);

    let result = match (file, debug) {
        (Some(file), true) => builder
            .with_writer(Mutex::new(file).and(std::io::stderr))
            .try_init(),
        (Some(file), false) => builder.with_writer(Mutex::new(file)).try_init(),
        (None, true) => builder.with_writer(std::io::stderr).try_init(),
        (None, false) => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("warning: failed to initialise logging: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with(".quickopen/quickopen.log"));
        }
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested/dir/quickopen.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        use std::io::Write;

        let temp = tempdir().unwrap();
        let path = temp.path().join("quickopen.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_error_names_path() {
        let temp = tempdir().unwrap();
        // A directory cannot be opened as a log file
        let err = open_log_file(temp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open log file"));
    }
}
