use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::types::{JobResult, WorkItem};

use super::runner::JobRunner;

/// Single worker: take items from request_rx, run the job, publish on result_tx.
/// Exits when the request queue is drained and closed, the result queue is gone, or abort is set.
fn recognize_worker_loop(
    request_rx: Receiver<WorkItem>,
    result_tx: Sender<JobResult>,
    runner: JobRunner,
    abort: Arc<AtomicBool>,
) {
    while let Ok(item) = request_rx.recv() {
        if abort.load(Ordering::Relaxed) {
            break;
        }
        if result_tx.send(runner.run(&item)).is_err() {
            break;
        }
    }
    drop(result_tx);
}

/// Spawn `num_threads` recognition workers. The result queue disconnects once every worker
/// has exited, so the caller must drop its own `result_tx` after this returns.
pub fn spawn_recognize_workers(
    request_rx: Receiver<WorkItem>,
    result_tx: &Sender<JobResult>,
    runner: &JobRunner,
    abort: &Arc<AtomicBool>,
    num_threads: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_threads)
        .map(|_| {
            let request_rx = request_rx.clone();
            let result_tx = result_tx.clone();
            let runner = runner.clone();
            let abort = Arc::clone(abort);
            thread::spawn(move || recognize_worker_loop(request_rx, result_tx, runner, abort))
        })
        .collect()
}
