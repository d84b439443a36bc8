//! Concurrent scheduling: scanners feed a bounded job queue, a fixed worker
//! pool drains it, outcomes stream back to the caller.

use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{bounded, unbounded};
use log::debug;

use crate::{Config, Outcome, RunSummary, process, scan};

/// Drive one full run: spawn a scanner per root and `config.workers()`
/// workers, then aggregate outcomes on the calling thread.
///
/// The two channels are the only shared state. The job queue is bounded so
/// scanners block once it fills; the queue closes when the last scanner
/// drops its sender, which is the barrier that lets workers drain and exit
/// instead of waiting forever. Workers hang up the outcome channel in turn,
/// so draining it until disconnection yields exactly one outcome per
/// discovered file — however many files each root contributed. There is no
/// cancellation; the run always processes everything that was enqueued.
pub(crate) fn run_pipeline<F>(config: &Config, mut report: F) -> RunSummary
where
    F: FnMut(Outcome),
{
    let (job_tx, job_rx) = bounded::<PathBuf>(config.queue_capacity());
    let (outcome_tx, outcome_rx) = unbounded::<Outcome>();
    let mut summary = RunSummary::default();

    thread::scope(|scope| {
        for _ in 0..config.workers().get() {
            let job_rx = job_rx.clone();
            let outcome_tx = outcome_tx.clone();
            scope.spawn(move || {
                for path in job_rx.iter() {
                    let outcome = process::process_file(config, &path);
                    if outcome_tx.send(outcome).is_err() {
                        break;
                    }
                }
            });
        }

        for root in config.roots() {
            let job_tx = job_tx.clone();
            scope.spawn(move || {
                let enqueued = scan::scan_root(root, config.extension(), &job_tx);
                debug!("scanned '{}': {enqueued} file(s) enqueued", root.display());
            });
        }

        // Only scanner threads and workers may keep the channels open now;
        // any handle retained here would deadlock the drain below.
        drop(job_tx);
        drop(job_rx);
        drop(outcome_tx);

        for outcome in outcome_rx.iter() {
            summary.record(&outcome);
            report(outcome);
        }
    });

    summary
}
