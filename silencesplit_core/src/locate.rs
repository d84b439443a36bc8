//! Discovery of the ffmpeg binary on the host.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CANDIDATE_NAMES: [&str; 2] = ["ffmpeg", "ffmpeg.exe"];

/// Locate the ffmpeg binary: the current directory first, then every `PATH`
/// entry.
///
/// Resolution happens once at startup; the returned path travels inside
/// [`Config`](crate::Config) to every component that spawns the tool.
/// Returns `None` when no candidate exists, which callers treat as fatal
/// before any work begins.
pub fn find_ffmpeg() -> Option<PathBuf> {
    for name in CANDIDATE_NAMES {
        let local = Path::new(name);
        if local.is_file() {
            return fs::canonicalize(local).ok();
        }
    }

    let path = env::var_os("PATH")?;
    for dir in env::split_paths(&path) {
        for name in CANDIDATE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    None
}
