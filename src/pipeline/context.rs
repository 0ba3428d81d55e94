//! Pipeline channels and tuning: the two shared queues and the worker count.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::types::{JobResult, WorkItem};
use crate::utils::config::WorkerThreadLimits;
use crate::utils::fd_limit::max_workers_by_fd_limit;

/// Tuning derived from available threads, FD limit and item count.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_threads: usize,
    /// Result channel capacity; workers block on publish once this many results are unread.
    pub result_cap: usize,
}

impl PipelineTuning {
    /// Worker count: the override if given, else available threads capped by the FD limit.
    /// Never more workers than items, never fewer than one.
    pub fn for_items(item_count: usize, override_threads: Option<usize>) -> Self {
        let limits = WorkerThreadLimits::current();
        let wanted = match override_threads {
            Some(n) => n,
            None => match max_workers_by_fd_limit() {
                Some(fd_cap) if fd_cap < limits.all_threads => {
                    debug!(
                        "Capping threads {} -> {} (FD limit ~80%)",
                        limits.all_threads, fd_cap
                    );
                    fd_cap
                }
                _ => limits.all_threads,
            },
        };
        let num_threads = wanted.min(item_count).max(limits.floor);
        Self {
            num_threads,
            result_cap: num_threads,
        }
    }
}

/// Request queue, result queue and the abort flag shared by all workers.
/// Requests are sized to hold every item so enqueueing never blocks.
pub struct PipelineChannels {
    pub request_tx: Sender<WorkItem>,
    pub request_rx: Receiver<WorkItem>,
    pub result_tx: Sender<JobResult>,
    pub result_rx: Receiver<JobResult>,
    pub abort: Arc<AtomicBool>,
}

pub fn create_pipeline_channels(item_count: usize, tuning: &PipelineTuning) -> PipelineChannels {
    let (request_tx, request_rx) = bounded::<WorkItem>(item_count.max(1));
    let (result_tx, result_rx) = bounded::<JobResult>(tuning.result_cap.max(1));
    PipelineChannels {
        request_tx,
        request_rx,
        result_tx,
        result_rx,
        abort: Arc::new(AtomicBool::new(false)),
    }
}
