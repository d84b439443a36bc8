mod cli;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use silencesplit_core::{Config, Outcome, find_ffmpeg, run_with_report};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli::build_cli().get_matches();

    let roots: Vec<PathBuf> = matches
        .get_many::<PathBuf>("roots")
        .expect("required argument")
        .cloned()
        .collect();

    let ffmpeg_path = find_ffmpeg().ok_or_else(|| {
        anyhow!("ffmpeg not found; install it and ensure it is on PATH or in the current directory")
    })?;
    log::info!("using ffmpeg from '{}'", ffmpeg_path.display());

    let mut builder = Config::builder(ffmpeg_path, roots);
    if let Some(workers) = matches.get_one::<NonZeroUsize>("workers") {
        builder = builder.workers(*workers);
    }
    if let Some(noise) = matches.get_one::<i32>("noise") {
        builder = builder.noise_threshold_db(*noise);
    }
    if let Some(min_silence) = matches.get_one::<Duration>("min-silence") {
        builder = builder.min_silence(*min_silence);
    }
    let config = builder.build().context("invalid configuration")?;

    let progress = ProgressBar::new(0);
    progress.set_draw_target(ProgressDrawTarget::stderr());
    let spinner_style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    progress.set_style(spinner_style);
    progress.enable_steady_tick(Duration::from_millis(100));

    let progress_handle = progress.clone();
    let summary = run_with_report(config, move |outcome| {
        progress_handle.suspend(|| match &outcome {
            Outcome::Split { path, outputs } => {
                println!("{}: wrote {} segment(s)", path.display(), outputs.len());
            }
            Outcome::NoSilence { path } => {
                println!("{}: no silence detected", path.display());
            }
            Outcome::Failed { path, error } => {
                eprintln!("{}: {error}", path.display());
            }
        });
        progress_handle.inc(1);
        progress_handle.set_message(format!("{} file(s) processed", progress_handle.position()));
    });

    progress.finish_and_clear();

    println!(
        "Processed {} file(s): {} split into {} segment(s), {} without silence, {} failed",
        summary.files, summary.split, summary.segments, summary.no_silence, summary.failed
    );

    if summary.failed > 0 {
        return Err(anyhow!("{} file(s) failed to process", summary.failed));
    }

    Ok(())
}
