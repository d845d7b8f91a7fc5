//! Page thumbnails via a headless Chromium-family browser.
//!
//! Every call gets its own throwaway profile directory and browser process.
//! Nothing is reused between captures, and the process and directory are
//! torn down before `capture` returns, whatever the outcome.

use crate::config::CaptureConfig;
use crate::error::{Result, ThumbmarkError};
use regex::Regex;
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

/// Renders a URL into PNG bytes
pub trait Capture {
    fn capture(&self, url: &str) -> Result<Vec<u8>>;
}

/// Closures can stand in for a browser
impl<F> Capture for F
where
    F: Fn(&str) -> Result<Vec<u8>>,
{
    fn capture(&self, url: &str) -> Result<Vec<u8>> {
        self(url)
    }
}

/// Browser binaries tried on PATH, in order
pub const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct HeadlessBrowser {
    binary: PathBuf,
    width: u32,
    height: u32,
    timeout: Duration,
    user_agent: Option<String>,
    no_sandbox: bool,
}

impl HeadlessBrowser {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        let defaults = CaptureConfig::default();
        Self {
            binary: binary.into(),
            width: defaults.width,
            height: defaults.height,
            timeout: Duration::from_secs(defaults.timeout_secs),
            user_agent: None,
            no_sandbox: false,
        }
    }

    /// Build from configuration, searching PATH when no binary is configured
    pub fn from_config(config: &CaptureConfig) -> Result<Self> {
        let binary = match &config.browser {
            Some(path) => path.clone(),
            None => find_browser().ok_or_else(|| {
                ThumbmarkError::Capture(format!(
                    "no headless browser found on PATH (tried {})",
                    BROWSER_CANDIDATES.join(", ")
                ))
            })?,
        };

        Ok(Self {
            binary,
            width: config.width,
            height: config.height,
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: Some(config.user_agent.clone()),
            no_sandbox: config.no_sandbox,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn args(&self, profile: &Path, output: &Path, url: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--headless=new",
            "--disable-gpu",
            "--hide-scrollbars",
            "--mute-audio",
            "--no-first-run",
            "--no-default-browser-check",
            "--disable-extensions",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        if self.no_sandbox {
            args.push("--no-sandbox".into());
        }
        if let Some(ua) = &self.user_agent {
            args.push(format!("--user-agent={}", ua).into());
        }

        let mut profile_arg = OsString::from("--user-data-dir=");
        profile_arg.push(profile);
        args.push(profile_arg);

        args.push(format!("--window-size={},{}", self.width, self.height).into());

        let mut screenshot_arg = OsString::from("--screenshot=");
        screenshot_arg.push(output);
        args.push(screenshot_arg);

        args.push(url.into());
        args
    }
}

impl Capture for HeadlessBrowser {
    fn capture(&self, url: &str) -> Result<Vec<u8>> {
        let session = tempfile::Builder::new()
            .prefix("thumbmark-capture-")
            .tempdir()
            .map_err(|e| ThumbmarkError::Capture(format!("failed to create browser profile: {}", e)))?;

        let profile = session.path().join("profile");
        let output = session.path().join("screenshot.png");
        let log_path = session.path().join("browser.log");

        // stderr goes to a file: a pipe could be held open by renderer
        // subprocesses that outlive a killed browser
        let log_file = File::create(&log_path)
            .map_err(|e| ThumbmarkError::Capture(format!("failed to create browser log: {}", e)))?;

        log::debug!("Capturing {} with {}", url, self.binary.display());

        let mut child = Command::new(&self.binary)
            .args(self.args(&profile, &output, url))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(log_file))
            .spawn()
            .map_err(|e| {
                ThumbmarkError::Capture(format!(
                    "failed to launch {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        let status = wait_with_deadline(&mut child, self.timeout)?;

        let stderr = fs::read_to_string(&log_path).unwrap_or_default();
        if let Some(err) = navigation_error(&stderr) {
            return Err(ThumbmarkError::Capture(format!(
                "navigation to {} failed: {}",
                url, err
            )));
        }

        if !status.success() {
            return Err(ThumbmarkError::Capture(format!(
                "browser exited with {} while loading {}",
                status, url
            )));
        }

        let bytes = fs::read(&output).map_err(|e| {
            ThumbmarkError::Capture(format!("no screenshot produced for {}: {}", url, e))
        })?;

        if !bytes.starts_with(PNG_MAGIC) {
            return Err(ThumbmarkError::Capture(format!(
                "browser output for {} is not a PNG image",
                url
            )));
        }

        log::debug!("Captured {} ({} bytes)", url, bytes.len());
        Ok(bytes)
    }
}

/// Wait for the child, killing and reaping it once `timeout` has elapsed
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {}
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ThumbmarkError::Capture(format!(
                    "failed to wait for browser: {}",
                    e
                )));
            }
        }

        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ThumbmarkError::Capture(format!(
                "timed out after {:.1}s",
                timeout.as_secs_f64()
            )));
        }

        thread::sleep(POLL_INTERVAL);
    }
}

fn net_error_regex() -> &'static Regex {
    static NET_ERROR: OnceLock<Regex> = OnceLock::new();
    NET_ERROR.get_or_init(|| Regex::new(r"net::ERR_[A-Z_]+").expect("valid regex"))
}

/// First main-frame network error code reported on stderr, if any.
///
/// Page console output (failed subresource loads, blocked trackers) shares
/// stderr with the browser's own log and does not fail the capture.
pub fn navigation_error(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .filter(|line| !is_page_console_line(line))
        .find_map(|line| net_error_regex().find(line))
        .map(|m| m.as_str())
}

fn is_page_console_line(line: &str) -> bool {
    line.contains(":CONSOLE(") || line.contains("Failed to load resource")
}

/// Locate the first known browser binary on PATH
pub fn find_browser() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    find_in_path(BROWSER_CANDIDATES, &path)
}

fn find_in_path(names: &[&str], path_var: &OsStr) -> Option<PathBuf> {
    for name in names {
        for dir in std::env::split_paths(path_var) {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}
