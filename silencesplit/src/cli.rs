use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Arg, Command, builder::ValueParser, value_parser};

/// Parse a human-friendly duration string into a [`Duration`].
///
/// Supported suffixes are `ms` (milliseconds), `s` (seconds), `m` (minutes),
/// and `h` (hours). Numbers may carry a fractional part and components may
/// be chained, such as `"1m30s"` or `"1.5s"`. The total duration must be
/// greater than zero.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let input = value.trim();
    if input.is_empty() {
        return Err("duration cannot be empty".into());
    }

    let invalid = || format!("invalid duration '{value}'");
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut index = 0;
    let mut total = Duration::ZERO;

    while index < len {
        let start = index;
        while index < len && (bytes[index].is_ascii_digit() || bytes[index] == b'.') {
            index += 1;
        }

        let number = input[start..index].parse::<f64>().map_err(|_| invalid())?;

        let remainder = &input[index..];
        let (unit_len, unit_seconds) = if remainder.starts_with("ms") {
            (2, 0.001)
        } else if remainder.starts_with('s') {
            (1, 1.0)
        } else if remainder.starts_with('m') {
            (1, 60.0)
        } else if remainder.starts_with('h') {
            (1, 3_600.0)
        } else {
            return Err(invalid());
        };
        index += unit_len;

        let component =
            Duration::try_from_secs_f64(number * unit_seconds).map_err(|_| invalid())?;
        total = total
            .checked_add(component)
            .ok_or_else(|| "duration is too large".to_owned())?;
    }

    if total.is_zero() {
        return Err("duration must be greater than zero".into());
    }

    Ok(total)
}

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about("Split audio files at detected silence")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("workers")
                .short('w')
                .long("workers")
                .value_name("COUNT")
                .help("Concurrent worker threads (defaults to the CPU count)")
                .value_parser(value_parser!(NonZeroUsize)),
        )
        .arg(
            Arg::new("noise")
                .short('n')
                .long("noise")
                .value_name("DB")
                .help("Loudness threshold in dBFS below which audio counts as silence")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32)),
        )
        .arg(
            Arg::new("min-silence")
                .short('d')
                .long("min-silence")
                .value_name("DURATION")
                .help("Minimum silence duration that splits a file (e.g. 500ms, 1.5s)")
                .value_parser(ValueParser::new(parse_duration)),
        )
        .arg(
            Arg::new("roots")
                .value_name("DIR")
                .help("Directories to scan recursively for audio files")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
}
