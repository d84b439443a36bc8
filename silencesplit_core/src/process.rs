//! Per-file orchestration: probe, parse, export.

use std::path::Path;

use log::info;

use crate::{Config, Outcome, export, parse, probe};

/// Process one discovered file to a terminal [`Outcome`].
///
/// Every failure is converted into an outcome here; nothing propagates out,
/// so one bad file can never abort its siblings or the scheduler. Zero
/// derived segments is the distinct `NoSilence` outcome rather than a
/// technical error.
pub(crate) fn process_file(config: &Config, path: &Path) -> Outcome {
    info!("processing '{}'", path.display());

    let log = match probe::detect_silence(config, path) {
        Ok(log) => log,
        Err(error) => {
            return Outcome::Failed {
                path: path.to_path_buf(),
                error,
            };
        }
    };

    let segments = parse::parse_silence(&log);
    if segments.is_empty() {
        info!("no pairable silence in '{}'", path.display());
        return Outcome::NoSilence {
            path: path.to_path_buf(),
        };
    }

    match export::export_segments(config, path, &segments) {
        Ok(outputs) => {
            info!(
                "split '{}' into {} segment(s)",
                path.display(),
                outputs.len()
            );
            Outcome::Split {
                path: path.to_path_buf(),
                outputs,
            }
        }
        Err(error) => Outcome::Failed {
            path: path.to_path_buf(),
            error,
        },
    }
}
