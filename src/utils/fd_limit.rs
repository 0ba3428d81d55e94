//! Worker cap from the open-file limit. Every worker holds a recognizer child process
//! with its pipes open, so a large pool on a low `ulimit -n` fails with EMFILE.

/// Descriptors one busy worker holds: stdin (/dev/null), stdout and stderr pipes, the image.
pub const FDS_PER_WORKER: usize = 4;

/// Share of the soft limit the pool may use; the rest is left for the merger, output and logging.
const USABLE_PERCENT: u64 = 80;

/// Soft `RLIMIT_NOFILE`, or `None` when unlimited or unknown.
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    let mut rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: getrlimit only writes into the struct we pass.
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rlim) } != 0 {
        return None;
    }
    match rlim.rlim_cur {
        libc::RLIM_INFINITY => None,
        soft => u64::try_from(soft).ok(),
    }
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Most workers that fit in the usable share of the limit (at least one).
/// `None` when there is no limit to respect.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let usable = max_open_fds()?.saturating_mul(USABLE_PERCENT) / 100;
    let workers = usize::try_from(usable).unwrap_or(usize::MAX) / FDS_PER_WORKER;
    Some(workers.max(1))
}
