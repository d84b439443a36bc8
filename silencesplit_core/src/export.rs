//! Materialization of derived segments as stream-copied output files.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::parse::Segment;
use crate::{Config, SplitError};

/// Write one output file per segment, strictly in index order.
///
/// Each invocation trims `(start, end)` out of `input` with `-c copy` — the
/// payload is re-packaged, never re-encoded. Exports for one file share the
/// source and output directory and therefore never run concurrently. The
/// first failing segment aborts the remainder; files already written stay on
/// disk, so a partial export leaves exactly the segments below the failing
/// index behind.
pub(crate) fn export_segments(
    config: &Config,
    input: &Path,
    segments: &[Segment],
) -> Result<Vec<PathBuf>, SplitError> {
    let mut outputs = Vec::with_capacity(segments.len());

    for segment in segments {
        let output_path = segment_output_path(input, segment.index, config.extension())?;
        debug!(
            "exporting segment {} of '{}' to '{}'",
            segment.index,
            input.display(),
            output_path.display()
        );

        let output = Command::new(config.ffmpeg_path())
            .arg("-i")
            .arg(input)
            .args(["-ss", &format_timestamp(segment.start)])
            .args(["-to", &format_timestamp(segment.end)])
            .args(["-c", "copy", "-y"])
            .arg(&output_path)
            .output()
            .map_err(|source| SplitError::ExportLaunch {
                path: input.to_path_buf(),
                index: segment.index,
                source,
            })?;

        if !output.status.success() {
            return Err(SplitError::ExportFailed {
                path: input.to_path_buf(),
                index: segment.index,
                status: output.status,
                log: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        outputs.push(output_path);
    }

    Ok(outputs)
}

/// Output path for one segment: `<stem>_part_<index:03>.<extension>` beside
/// the input file.
fn segment_output_path(
    input: &Path,
    index: usize,
    extension: &str,
) -> Result<PathBuf, SplitError> {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or(SplitError::InvalidInputName)?;

    Ok(input.with_file_name(format!("{stem}_part_{index:03}.{extension}")))
}

/// Fixed-point seconds as ffmpeg expects them on `-ss`/`-to`.
fn format_timestamp(seconds: f64) -> String {
    format!("{seconds:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_sibling_output_paths() {
        let path = segment_output_path(Path::new("/music/talk.mp3"), 0, "mp3").unwrap();
        assert_eq!(path, PathBuf::from("/music/talk_part_000.mp3"));
    }

    #[test]
    fn zero_pads_indices_to_three_digits() {
        let input = Path::new("talk.mp3");
        assert_eq!(
            segment_output_path(input, 7, "mp3").unwrap(),
            PathBuf::from("talk_part_007.mp3")
        );
        assert_eq!(
            segment_output_path(input, 42, "mp3").unwrap(),
            PathBuf::from("talk_part_042.mp3")
        );
        assert_eq!(
            segment_output_path(input, 1234, "mp3").unwrap(),
            PathBuf::from("talk_part_1234.mp3")
        );
    }

    #[test]
    fn distinct_indices_yield_distinct_names() {
        let input = Path::new("episode.mp3");
        let first = segment_output_path(input, 0, "mp3").unwrap();
        let second = segment_output_path(input, 1, "mp3").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn strips_only_the_final_extension() {
        let path = segment_output_path(Path::new("show.2024.mp3"), 0, "mp3").unwrap();
        assert_eq!(path, PathBuf::from("show.2024_part_000.mp3"));
    }

    #[test]
    fn timestamps_are_six_decimal_fixed_point() {
        assert_eq!(format_timestamp(2.5), "2.500000");
        assert_eq!(format_timestamp(0.0), "0.000000");
        assert_eq!(format_timestamp(10.8), "10.800000");
    }
}
