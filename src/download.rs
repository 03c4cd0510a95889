//! Materializing remote videos to local files.
//!
//! Scanning needs a local file, so a URL is first downloaded in full by a
//! [`Downloader`]. The download blocks and must finish before the scan
//! starts. [`YtDlpDownloader`] shells out to the `yt-dlp` program, which
//! understands both direct media links and video hosting pages.
//!
//! # Example
//!
//! ```no_run
//! use daypart::{DaypartError, Downloader, YtDlpDownloader};
//!
//! let downloader = YtDlpDownloader::new();
//! let path = downloader.download("https://example.com/clip.mp4", "clip.mp4".as_ref())?;
//! # Ok::<(), DaypartError>(())
//! ```

use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::error::DaypartError;

/// Where downloads land when no destination is given. Overwritten on every
/// run and never cleaned up.
pub const DEFAULT_DOWNLOAD_PATH: &str = "temp_video_from_url.mp4";

/// Fetches a remote video into a local file.
pub trait Downloader {
    /// Download `url` to `destination`, replacing any existing file, and
    /// return the path of the written file.
    ///
    /// # Errors
    ///
    /// [`DaypartError::DownloadFailed`] for any failure.
    fn download(&self, url: &str, destination: &Path) -> Result<PathBuf, DaypartError>;
}

/// Downloads with the external `yt-dlp` program.
///
/// Requests the best single-file format and refuses playlists.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    program: OsString,
    extra_args: Vec<OsString>,
}

impl Default for YtDlpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlpDownloader {
    /// Use `yt-dlp` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: OsString::from("yt-dlp"),
            extra_args: Vec::new(),
        }
    }

    /// Use a different executable, e.g. an absolute path or `youtube-dl`.
    #[must_use]
    pub fn with_program<S: Into<OsString>>(mut self, program: S) -> Self {
        self.program = program.into();
        self
    }

    /// Append an argument passed before the URL.
    #[must_use]
    pub fn with_arg<S: Into<OsString>>(mut self, arg: S) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    fn command(&self, url: &str, destination: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--format")
            .arg("best")
            .arg("--no-playlist")
            .arg("--force-overwrites")
            .arg("--quiet")
            .arg("--output")
            .arg(output_template(destination))
            .args(&self.extra_args)
            .arg("--")
            .arg(url)
            .stdin(Stdio::null());
        command
    }
}

/// `--output` is a template; `%` must be doubled to name a literal file.
fn output_template(destination: &Path) -> OsString {
    match destination.to_str() {
        Some(path) => OsString::from(path.replace('%', "%%")),
        None => destination.as_os_str().to_os_string(),
    }
}

impl Downloader for YtDlpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<PathBuf, DaypartError> {
        let failed = |reason: String| DaypartError::DownloadFailed {
            url: url.to_string(),
            reason,
        };

        log::debug!("Downloading {url} to {}", destination.display());

        let output = self.command(url, destination).output().map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                failed(format!(
                    "{} not found; install it or pass another downloader",
                    self.program.to_string_lossy()
                ))
            } else {
                failed(error.to_string())
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .map(|line| line.trim().to_string())
                .unwrap_or_else(|| format!("downloader exited with {}", output.status));
            return Err(failed(reason));
        }

        if !destination.is_file() {
            return Err(failed(format!(
                "downloader reported success but {} was not written",
                destination.display()
            )));
        }

        Ok(destination.to_path_buf())
    }
}
