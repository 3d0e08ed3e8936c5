//! Browser launcher - Hands a URL to the platform's default opener

use std::error::Error as _;
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;

use crate::core::model::LaunchStatus;

/// Failure to hand a URL to the OS
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    #[error("failed to run `{program}` for {url}")]
    Spawn {
        program: String,
        url: String,
        #[source]
        source: io::Error,
    },
}

/// Display an error followed by its causes, `: `-separated
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Something that can open a URL
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<LaunchStatus, LaunchError>;
}

const NO_ARGS: &[&str] = &[];
const WINDOWS_ARGS: &[&str] = &["url.dll,FileProtocolHandler"];

/// Known opener commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    /// Map an OS name (as in `std::env::consts::OS`) to a platform
    pub fn from_os(os: &str) -> Result<Self, LaunchError> {
        match os {
            "macos" => Ok(Platform::MacOs),
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            other => Err(LaunchError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// Program and leading arguments; the URL is appended last
    pub fn opener(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Platform::MacOs => ("open", NO_ARGS),
            Platform::Linux => ("xdg-open", NO_ARGS),
            Platform::Windows => ("rundll32", WINDOWS_ARGS),
        }
    }
}

/// Opens URLs with the OS default browser
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    os: String,
}

impl SystemLauncher {
    pub fn new() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    pub fn for_os(os: impl Into<String>) -> Self {
        Self { os: os.into() }
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserLauncher for SystemLauncher {
    fn open(&self, url: &str) -> Result<LaunchStatus, LaunchError> {
        let platform = Platform::from_os(&self.os)?;
        let (program, args) = platform.opener();

        // Spawn without waiting; the opener detaches on its own
        Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.to_string(),
                url: url.to_string(),
                source,
            })?;

        tracing::info!(url, os = %self.os, program, "opened in browser");
        Ok(LaunchStatus::Opened)
    }
}

/// Debug-mode launcher: logs the URL and never starts a process
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunLauncher;

impl BrowserLauncher for DryRunLauncher {
    fn open(&self, url: &str) -> Result<LaunchStatus, LaunchError> {
        tracing::debug!(url, "debug mode, not opening browser");
        Ok(LaunchStatus::Printed)
    }
}
