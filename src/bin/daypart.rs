use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use daypart::{
    Category, Downloader, FfmpegLogLevel, Input, Outcome, ProgressCallback, ProgressInfo,
    ScanOptions, ScanResult, VideoFile, YtDlpDownloader, report,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  daypart scan dashcam.mp4\n  daypart scan https://example.com/timelapse.mp4 --samples out --progress\n  daypart scan clip.mov --json --strict\n  daypart probe clip.mov\n  daypart completions zsh > _daypart";

#[derive(Debug, Parser)]
#[command(
    name = "daypart",
    version,
    about = "Classify video frames as Day, Evening, or Night by brightness",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional diagnostic output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar while scanning.
    #[arg(long, global = true)]
    progress: bool,

    /// Allow overwriting existing sample images.
    #[arg(long, global = true)]
    overwrite: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify every frame and print per-category percentages.
    #[command(
        about = "Scan a video and report Day/Evening/Night percentages",
        after_help = "Examples:\n  daypart scan input.mp4\n  daypart scan input.mp4 --samples samples --json"
    )]
    Scan {
        /// Input video path or URL.
        input: String,

        /// Output the summary as machine-readable JSON.
        #[arg(long)]
        json: bool,

        /// Directory to write the first Day/Evening/Night frame to, as PNG.
        #[arg(long)]
        samples: Option<PathBuf>,

        /// Fail when the input cannot be opened instead of reporting zero frames.
        #[arg(long)]
        strict: bool,

        /// Stop after this many frames.
        #[arg(long)]
        max_frames: Option<u64>,

        /// Where to store a downloaded URL input.
        #[arg(long, default_value = daypart::DEFAULT_DOWNLOAD_PATH)]
        download_to: PathBuf,

        /// Downloader executable used for URL inputs.
        #[arg(long, default_value = "yt-dlp")]
        downloader: String,
    },

    /// Print metadata of the selected video stream.
    #[command(about = "Print video metadata", visible_alias = "info")]
    Probe {
        /// Input video path or URL.
        input: String,

        /// Output metadata as machine-readable JSON.
        #[arg(long)]
        json: bool,

        /// Where to store a downloaded URL input.
        #[arg(long, default_value = daypart::DEFAULT_DOWNLOAD_PATH)]
        download_to: PathBuf,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn apply_global_options(global: &GlobalOptions) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(level) = &global.log_level {
        let parsed: FfmpegLogLevel = level.parse()?;
        daypart::set_ffmpeg_log_level(parsed);
    }
    Ok(())
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

/// Drives an indicatif bar from scan progress callbacks.
struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::no_length();
        let style = ProgressStyle::with_template(
            "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} frames {msg}",
        )?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total.max(info.current));
        }
        self.bar.set_position(info.current);
        match info.last_category {
            Some(category) => self.bar.set_message(category.label()),
            None => self.bar.finish_and_clear(),
        }
    }
}

fn resolve_input(
    input: &str,
    download_to: PathBuf,
    downloader: &dyn Downloader,
    verbose: bool,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match Input::parse(input).with_destination(download_to) {
        Input::Path(path) => Ok(path),
        Input::Url { url, destination } => {
            if verbose {
                eprintln!("downloading {url} -> {}", destination.display());
            }
            Ok(downloader.download(&url, &destination)?)
        }
    }
}

/// Refuse to start a scan whose sample files would clobber existing ones.
fn check_sample_targets(
    directory: &Path,
    overwrite: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for category in Category::ALL {
        ensure_writable_path(&directory.join(report::sample_file_name(category)), overwrite)?;
    }
    Ok(())
}

/// Everything `scan` writes to stdout. In JSON mode this is one document,
/// with the written sample paths under `"samples"`.
fn scan_output(
    outcome: &Outcome,
    json: bool,
    saved: &[PathBuf],
) -> Result<String, Box<dyn std::error::Error>> {
    let empty = ScanResult::empty();
    let result = match outcome {
        Outcome::Processed(result) => result,
        Outcome::NoFrames => &empty,
        Outcome::DownloadFailed(_) | Outcome::ProcessingFailed(_) => {
            return Err(outcome.message().unwrap_or_default().into());
        }
    };

    if json {
        let mut payload = report::to_json(result);
        payload["samples"] = json!(
            saved
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
        );
        Ok(format!("{}\n", serde_json::to_string_pretty(&payload)?))
    } else {
        Ok(report::render_text(result))
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    apply_global_options(&cli.global)?;

    match cli.command {
        Commands::Scan {
            input,
            json,
            samples,
            strict,
            max_frames,
            download_to,
            downloader,
        } => {
            let mut options = ScanOptions::new().with_strict_open(strict);
            if let Some(limit) = max_frames {
                options = options.with_frame_limit(limit);
            }
            if cli.global.progress {
                options = options
                    .with_progress(Arc::new(TerminalProgress::new()?))
                    .with_batch_size(25);
            }

            if let Some(directory) = &samples {
                check_sample_targets(directory, cli.global.overwrite)?;
            }

            let input = Input::parse(&input).with_destination(download_to);
            if cli.global.verbose {
                eprintln!("scanning {}", input.local_path().display());
            }

            let downloader = YtDlpDownloader::new().with_program(downloader);
            let outcome = daypart::analyze(&input, &options, &downloader);

            let saved = match (&samples, outcome.result()) {
                (Some(directory), Some(result)) => report::save_samples(result, directory)?,
                _ => Vec::new(),
            };
            if cli.global.verbose {
                for path in &saved {
                    eprintln!("saved sample -> {}", path.display());
                }
            }

            print!("{}", scan_output(&outcome, json, &saved)?);

            if let Some(directory) = samples.as_ref().filter(|_| !json && !saved.is_empty()) {
                println!(
                    "{} {}",
                    "saved".green().bold(),
                    format!("{} sample frame(s) to {}", saved.len(), directory.display()).green()
                );
            }
        }
        Commands::Probe {
            input,
            json,
            download_to,
        } => {
            let path = resolve_input(
                &input,
                download_to,
                &YtDlpDownloader::new(),
                cli.global.verbose,
            )?;
            let video = VideoFile::open(&path)?;
            let metadata = video.metadata();
            if json {
                let payload = json!({
                    "format": metadata.format,
                    "duration_seconds": metadata.duration.as_secs_f64(),
                    "width": metadata.width,
                    "height": metadata.height,
                    "fps": metadata.frames_per_second,
                    "frame_count": metadata.frame_count,
                    "codec": metadata.codec,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Format: {}", metadata.format);
                println!("Duration: {:?}", metadata.duration);
                println!(
                    "Video: {}x{} @ {:.2} fps [{}]",
                    metadata.width, metadata.height, metadata.frames_per_second, metadata.codec,
                );
                println!("Estimated frames: {}", metadata.frame_count);
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "daypart", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};
    use daypart::{FrameTally, Outcome, ScanResult};
    use image::{Rgb, RgbImage};

    use super::{Cli, Commands, check_sample_targets, scan_output};

    fn processed(levels: &[u8]) -> Outcome {
        let mut tally = FrameTally::new();
        for &level in levels {
            tally.record(RgbImage::from_pixel(2, 2, Rgb([level, level, level])));
        }
        Outcome::from_scan(Ok(tally.finish()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scan_defaults() {
        let cli = Cli::try_parse_from(["daypart", "scan", "clip.mp4"]).unwrap();
        match cli.command {
            Commands::Scan {
                input,
                json,
                strict,
                max_frames,
                download_to,
                ..
            } => {
                assert_eq!(input, "clip.mp4");
                assert!(!json);
                assert!(!strict);
                assert!(max_frames.is_none());
                assert_eq!(download_to.to_str(), Some(daypart::DEFAULT_DOWNLOAD_PATH));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["daypart", "scan", "clip.mp4", "--progress", "--verbose"])
            .unwrap();
        assert!(cli.global.progress);
        assert!(cli.global.verbose);
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["daypart", "classify", "clip.mp4"]).is_err());
    }

    #[test]
    fn json_output_with_samples_is_one_document() {
        let saved = vec![
            PathBuf::from("out/sample_day.png"),
            PathBuf::from("out/sample_night.png"),
        ];
        let stdout = scan_output(&processed(&[200, 10, 200]), true, &saved).unwrap();

        let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["total_frames"], 3);
        assert_eq!(value["samples"][0], "out/sample_day.png");
        assert_eq!(value["samples"][1], "out/sample_night.png");
    }

    #[test]
    fn json_output_without_frames_parses() {
        let stdout = scan_output(&Outcome::NoFrames, true, &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["total_frames"], 0);
        assert_eq!(value["samples"], serde_json::json!([]));
    }

    #[test]
    fn text_output_and_failures() {
        assert_eq!(
            scan_output(&Outcome::NoFrames, false, &[]).unwrap(),
            daypart::report::render_text(&ScanResult::empty())
        );
        let error = scan_output(&Outcome::DownloadFailed("404".into()), true, &[]).unwrap_err();
        assert_eq!(error.to_string(), "Error downloading video: 404");
    }

    #[test]
    fn existing_sample_blocks_scan_unless_overwrite() {
        let directory = tempfile::tempdir().unwrap();
        assert!(check_sample_targets(directory.path(), false).is_ok());

        std::fs::write(directory.path().join("sample_evening.png"), b"old").unwrap();
        let error = check_sample_targets(directory.path(), false).unwrap_err();
        assert!(error.to_string().contains("sample_evening.png"), "{error}");
        assert!(check_sample_targets(directory.path(), true).is_ok());
    }
}
