//! Progress bar utilities for displaying recognition status

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a page progress bar. Pass 0 when the total is not known yet.
pub fn create_progress_bar(total: usize, desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = total,
        desc = desc,
        animation = Animation::Classic,
        unit = " pages"
    )))
}

/// Update progress bar if available
/// Uses try_lock to avoid blocking if mutex is contended (non-blocking)
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Update the bar's total (known only once the pages have been enumerated). Refreshes the display.
pub fn set_bar_total(pb: &ProgressBar, total: usize) {
    if let Ok(mut bar) = pb.try_lock()
        && bar.total != total
    {
        bar.total = total;
        let _ = bar.refresh();
    }
}

/// Callback for [`run_ocr`](crate::pipeline::run_ocr): `(released, total)` per released page.
pub type ReleaseCallback = Box<dyn Fn(usize, usize) + Send>;

/// Create a release callback that updates the progress bar.
pub fn progress_callback(bar: &Option<ProgressBar>) -> Option<ReleaseCallback> {
    bar.as_ref().map(|bar| {
        let bar = Arc::clone(bar);
        Box::new(move |n: usize, total: usize| {
            set_bar_total(&bar, total);
            update_progress_bar(&bar, n);
        }) as ReleaseCallback
    })
}
