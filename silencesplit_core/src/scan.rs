//! Discovery of candidate audio files under a root directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use log::warn;
use walkdir::WalkDir;

/// Walk `root` and send every candidate file into the job queue.
///
/// Candidates are non-directory entries whose extension matches `extension`
/// case-insensitively. Paths are sent in discovery order; the order between
/// sibling entries is whatever the filesystem yields. Unreadable entries are
/// logged and skipped, which prunes that subtree without stopping the rest
/// of the walk or scanners on other roots. The send blocks while the queue
/// is full.
///
/// Returns the number of files enqueued for this root.
pub(crate) fn scan_root(root: &Path, extension: &str, jobs: &Sender<PathBuf>) -> usize {
    let mut enqueued = 0;

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!("skipping unreadable entry under '{}': {error}", root.display());
                continue;
            }
        };

        if entry.file_type().is_dir() || !matches_extension(entry.path(), extension) {
            continue;
        }

        // A send error means the receiving side is gone; nothing more to do.
        if jobs.send(entry.into_path()).is_err() {
            break;
        }
        enqueued += 1;
    }

    enqueued
}

/// Case-insensitive extension match against the configured input format.
pub(crate) fn matches_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
