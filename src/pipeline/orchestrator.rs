use anyhow::Result;
use log::debug;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread::JoinHandle;

use crate::Opts;
use crate::engine::filters::Filters;
use crate::engine::progress::ReleaseCallback;
use crate::pipeline;
use crate::pipeline::runner::{JobRunner, Recognize};
use crate::utils::config::ExternalTools;

/// Join all workers after the result queue has been drained.
pub fn shutdown_workers(worker_handles: Vec<JoinHandle<()>>) -> Result<()> {
    for h in worker_handles {
        h.join()
            .map_err(|_| anyhow::anyhow!("recognition worker panicked"))?;
    }
    Ok(())
}

/// Main orchestrator: recognize every page image in `dir` and return the filtered text.
/// Enumerate → request queue → workers (recognizer) → result queue → merger → line stage → text filter.
///
/// `on_release` is called with `(1, item_count)` for every payload released in order (progress).
/// On the first failed page the workers are told to stop and are abandoned, not joined.
pub fn run_ocr(
    dir: &Path,
    opts: &Opts,
    recognizer: Arc<dyn Recognize>,
    filters: &Filters,
    on_release: Option<ReleaseCallback>,
) -> Result<Vec<u8>> {
    let items = pipeline::enumerate_work(dir, ExternalTools::IMAGE_PATTERN)?;
    let item_count = items.len();

    let tuning = pipeline::PipelineTuning::for_items(item_count, opts.num_threads);
    debug!(
        "Recognizing {} images with {} workers",
        item_count, tuning.num_threads
    );
    let channels = pipeline::create_pipeline_channels(item_count, &tuning);

    // Request queue holds every item, so this never blocks; closing it lets idle workers exit.
    for item in items {
        channels.request_tx.send(item)?;
    }
    drop(channels.request_tx);

    let runner = JobRunner::new(recognizer, opts.first_page);
    let worker_handles = pipeline::spawn_recognize_workers(
        channels.request_rx,
        &channels.result_tx,
        &runner,
        &channels.abort,
        tuning.num_threads,
    );

    // Dropping the last sender here means the result queue closes when the last worker exits.
    drop(channels.result_tx);

    let line_filter = |line: &[u8]| filters.apply_line(line);
    let mut stage = pipeline::LineStage::new(&line_filter);
    let merged = pipeline::merge_in_order(channels.result_rx.iter(), |_seq, payload| {
        stage.push_payload(payload);
        if let Some(cb) = on_release.as_ref() {
            cb(1, item_count);
        }
        Ok(())
    });

    if let Err(e) = merged {
        channels.abort.store(true, Ordering::Relaxed);
        debug!("Pipeline aborted; abandoning in-flight jobs");
        return Err(e);
    }

    shutdown_workers(worker_handles)?;
    debug!("Merged {} lines from {} pages", stage.line_count(), item_count);

    let text_filter = |text: &[u8]| filters.apply_text(text);
    Ok(stage.finish(&text_filter))
}
