//! Batch audio splitting at detected silence.
//!
//! The library walks one or more directory trees for audio files, asks
//! `ffmpeg`'s `silencedetect` filter where the silent stretches in each file
//! are, derives the non-silent segments between those stretches and
//! stream-copies every segment into its own output file next to the input.
//! Discovery, probing and exporting run concurrently across files through a
//! bounded job queue and a fixed worker pool.

mod export;
mod locate;
mod parse;
mod pipeline;
mod probe;
mod process;
mod scan;

use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

pub use locate::find_ffmpeg;
pub use parse::{Segment, parse_silence};

/// Loudness threshold, in dBFS, below which audio counts as silent.
pub const DEFAULT_NOISE_THRESHOLD_DB: i32 = -30;

/// Minimum duration a quiet stretch must last to count as silence.
pub const DEFAULT_MIN_SILENCE: Duration = Duration::from_secs(1);

/// File extension scanned for and written when none is configured.
pub const DEFAULT_EXTENSION: &str = "mp3";

/// Jobs the queue buffers before scanners block on it.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Errors that can occur while configuring, probing or splitting audio files.
#[derive(Debug, Error)]
pub enum SplitError {
    /// No root directories were supplied to scan.
    #[error("no root directories were provided")]
    NoRoots,

    /// The configured minimum silence duration was zero.
    #[error("minimum silence duration must be greater than zero")]
    InvalidMinSilence,

    /// The configured job queue capacity was zero.
    #[error("job queue capacity must be greater than zero")]
    InvalidQueueCapacity,

    /// The configured output extension was empty.
    #[error("output extension must not be empty")]
    InvalidExtension,

    /// The analyzer process could not be spawned.
    #[error("failed to launch ffmpeg for '{path}': {source}")]
    ProbeLaunch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The analyzer ran but exited unsuccessfully; `log` holds everything it
    /// wrote to its diagnostic stream up to that point.
    #[error("silence analysis of '{path}' failed with {status}\n{log}")]
    ProbeFailed {
        path: PathBuf,
        status: ExitStatus,
        log: String,
    },

    /// The encoder process could not be spawned for one segment.
    #[error("failed to launch ffmpeg for segment {index} of '{path}': {source}")]
    ExportLaunch {
        path: PathBuf,
        index: usize,
        #[source]
        source: io::Error,
    },

    /// The encoder failed while writing one segment. Segments with lower
    /// indices have already been written and remain on disk.
    #[error("export of segment {index} from '{path}' failed with {status}\n{log}")]
    ExportFailed {
        path: PathBuf,
        index: usize,
        status: ExitStatus,
        log: String,
    },

    /// Error produced when a file name cannot be derived from the input path.
    #[error("failed to derive a base name for the input file")]
    InvalidInputName,

    /// Wrapper around IO errors encountered while reading or writing files.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Configuration for one pipeline run.
///
/// Built through [`Config::new`] or [`Config::builder`]; the resolved ffmpeg
/// path is carried here and handed to every component that spawns the tool,
/// so nothing consults global state after startup.
#[derive(Clone, Debug)]
pub struct Config {
    ffmpeg_path: PathBuf,
    roots: Vec<PathBuf>,
    extension: String,
    noise_threshold_db: i32,
    min_silence: Duration,
    workers: NonZeroUsize,
    queue_capacity: usize,
}

impl Config {
    /// Construct a configuration with default tuning for the given ffmpeg
    /// binary and scan roots.
    pub fn new<P: Into<PathBuf>>(ffmpeg_path: P, roots: Vec<PathBuf>) -> Result<Self, SplitError> {
        Self::builder(ffmpeg_path, roots).build()
    }

    /// Start building a configuration, overriding defaults as needed.
    pub fn builder<P: Into<PathBuf>>(ffmpeg_path: P, roots: Vec<PathBuf>) -> ConfigBuilder {
        ConfigBuilder {
            ffmpeg_path: ffmpeg_path.into(),
            roots,
            extension: DEFAULT_EXTENSION.to_owned(),
            noise_threshold_db: DEFAULT_NOISE_THRESHOLD_DB,
            min_silence: DEFAULT_MIN_SILENCE,
            workers: default_workers(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Path of the ffmpeg binary used for probing and exporting.
    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Root directories scanned for input files.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Number of concurrent worker threads.
    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub(crate) fn extension(&self) -> &str {
        &self.extension
    }

    pub(crate) fn noise_threshold_db(&self) -> i32 {
        self.noise_threshold_db
    }

    pub(crate) fn min_silence(&self) -> Duration {
        self.min_silence
    }

    pub(crate) fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }
}

/// Builder returned by [`Config::builder`].
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    ffmpeg_path: PathBuf,
    roots: Vec<PathBuf>,
    extension: String,
    noise_threshold_db: i32,
    min_silence: Duration,
    workers: NonZeroUsize,
    queue_capacity: usize,
}

impl ConfigBuilder {
    /// Extension (without the dot) selected while scanning and used for
    /// segment output files.
    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    /// Loudness threshold in dBFS below which audio counts as silent.
    pub fn noise_threshold_db(mut self, threshold: i32) -> Self {
        self.noise_threshold_db = threshold;
        self
    }

    /// Minimum duration a quiet stretch must last to count as silence.
    pub fn min_silence(mut self, min_silence: Duration) -> Self {
        self.min_silence = min_silence;
        self
    }

    /// Number of concurrent worker threads. Defaults to the CPU count; force
    /// a single worker for deterministic processing order.
    pub fn workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    /// Capacity of the bounded job queue between scanners and workers.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Validate the settings and produce a [`Config`].
    pub fn build(self) -> Result<Config, SplitError> {
        if self.roots.is_empty() {
            return Err(SplitError::NoRoots);
        }
        if self.min_silence.is_zero() {
            return Err(SplitError::InvalidMinSilence);
        }
        if self.queue_capacity == 0 {
            return Err(SplitError::InvalidQueueCapacity);
        }
        if self.extension.is_empty() {
            return Err(SplitError::InvalidExtension);
        }

        Ok(Config {
            ffmpeg_path: self.ffmpeg_path,
            roots: self.roots,
            extension: self.extension,
            noise_threshold_db: self.noise_threshold_db,
            min_silence: self.min_silence,
            workers: self.workers,
            queue_capacity: self.queue_capacity,
        })
    }
}

fn default_workers() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

/// Terminal result of processing one discovered file.
#[derive(Debug)]
pub enum Outcome {
    /// The file was split; `outputs` lists the written segment files in
    /// index order.
    Split {
        path: PathBuf,
        outputs: Vec<PathBuf>,
    },
    /// The analyzer reported no pairable silence, so no segments exist.
    NoSilence { path: PathBuf },
    /// Probing or exporting failed. Other files are unaffected.
    Failed { path: PathBuf, error: SplitError },
}

impl Outcome {
    /// Path of the input file this outcome belongs to.
    pub fn path(&self) -> &Path {
        match self {
            Outcome::Split { path, .. }
            | Outcome::NoSilence { path }
            | Outcome::Failed { path, .. } => path,
        }
    }
}

/// Aggregate counters for a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files pulled from the job queue and processed to a terminal outcome.
    pub files: usize,
    /// Files that produced at least one segment.
    pub split: usize,
    /// Segment files written across all inputs.
    pub segments: usize,
    /// Files in which no pairable silence was detected.
    pub no_silence: usize,
    /// Files that failed while probing or exporting.
    pub failed: usize,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: &Outcome) {
        self.files += 1;
        match outcome {
            Outcome::Split { outputs, .. } => {
                self.split += 1;
                self.segments += outputs.len();
            }
            Outcome::NoSilence { .. } => self.no_silence += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Run the pipeline described by `config`, discarding per-file outcomes.
pub fn run(config: Config) -> RunSummary {
    run_with_report(config, |_| {})
}

/// Run the pipeline and hand every [`Outcome`] to `report` as it arrives.
///
/// Outcomes are delivered in completion order, which is unrelated to
/// discovery order once more than one worker is active. The callback runs on
/// the calling thread.
pub fn run_with_report<F>(config: Config, report: F) -> RunSummary
where
    F: FnMut(Outcome),
{
    pipeline::run_pipeline(&config, report)
}
