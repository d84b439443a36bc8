//! Silence analysis of a single file through ffmpeg's `silencedetect` filter.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use log::debug;

use crate::{Config, SplitError};

/// Run the analyzer over `input` and return its full diagnostic stream.
///
/// ffmpeg is invoked in analysis-only mode (`-f null -`), so no media is
/// written; everything of interest lands on stderr. A non-zero exit is
/// terminal for this file and carries the collected diagnostics, there is no
/// retry.
pub(crate) fn detect_silence(config: &Config, input: &Path) -> Result<String, SplitError> {
    let filter = silence_filter(config.noise_threshold_db(), config.min_silence());
    debug!("probing '{}' with '{filter}'", input.display());

    let output = Command::new(config.ffmpeg_path())
        .arg("-i")
        .arg(input)
        .arg("-af")
        .arg(&filter)
        .args(["-f", "null", "-"])
        .output()
        .map_err(|source| SplitError::ProbeLaunch {
            path: input.to_path_buf(),
            source,
        })?;

    let log = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        return Err(SplitError::ProbeFailed {
            path: input.to_path_buf(),
            status: output.status,
            log,
        });
    }

    Ok(log)
}

/// Render the `silencedetect` filter directive for the configured threshold
/// and minimum duration, e.g. `silencedetect=noise=-30dB:d=1`.
fn silence_filter(noise_threshold_db: i32, min_silence: Duration) -> String {
    format!(
        "silencedetect=noise={noise_threshold_db}dB:d={}",
        min_silence.as_secs_f64()
    )
}
