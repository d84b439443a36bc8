//! Extraction of silence boundaries from ffmpeg's diagnostic output and
//! derivation of the playback segments between them.

const SILENCE_END_TAG: &str = "silence_end: ";
const SILENCE_START_TAG: &str = "silence_start: ";

/// One non-silent stretch of the input, destined for its own output file.
///
/// `start` and `end` are seconds from the beginning of the input; `index` is
/// the position in the derived sequence and drives output naming.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

/// Derive playback segments from the analyzer's diagnostic text.
///
/// The text is scanned line by line in emission order. A line reports either
/// the end of a silent stretch (`silence_end: <secs>`) or the start of one
/// (`silence_start: <secs>`); the two tags never share a line. The timestamps
/// are collected into two separate sequences and paired as
/// `(ends[i], starts[i + 1])`: audio before the first `silence_start` is
/// leading silence rather than a segment, and a trailing `silence_start`
/// without a later pairing opportunity is dropped.
///
/// Returns an empty vector when no pairing exists; callers treat that as
/// "no silence detected", not as a failure.
pub fn parse_silence(log: &str) -> Vec<Segment> {
    let mut ends = Vec::new();
    let mut starts = Vec::new();

    for line in log.lines() {
        if let Some(seconds) = tagged_seconds(line, SILENCE_END_TAG) {
            ends.push(seconds);
        } else if let Some(seconds) = tagged_seconds(line, SILENCE_START_TAG) {
            starts.push(seconds);
        }
    }

    pair_segments(&ends, &starts)
}

/// Extract the timestamp following `tag` on `line`, if any.
///
/// The capture is the longest run of digits and dots directly after the tag,
/// which also covers lines where ffmpeg appends `| silence_duration: …`.
/// Captures that do not parse as a float are skipped rather than reported.
fn tagged_seconds(line: &str, tag: &str) -> Option<f64> {
    let (_, rest) = line.split_once(tag)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

fn pair_segments(ends: &[f64], starts: &[f64]) -> Vec<Segment> {
    let pairable = ends.len().min(starts.len().saturating_sub(1));
    (0..pairable)
        .map(|index| Segment {
            index,
            start: ends[index],
            end: starts[index + 1],
        })
        .collect()
}
