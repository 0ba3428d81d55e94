//! Order-restoring merge: results arrive in any order, payloads leave in strict `seq` order.

use anyhow::Result;
use log::debug;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::types::JobResult;

/// A successful result waiting for its turn. Ordered by `seq` only.
struct Pending {
    seq: usize,
    payload: Vec<u8>,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seq.cmp(&other.seq)
    }
}

/// Min-heap of results that arrived ahead of the next expected one.
#[derive(Default)]
struct PendingSet {
    heap: BinaryHeap<Reverse<Pending>>,
}

impl PendingSet {
    /// Panics if `seq` is already pending.
    fn push(&mut self, seq: usize, payload: Vec<u8>) {
        assert!(
            !self.heap.iter().any(|Reverse(p)| p.seq == seq),
            "sequence number {} is already pending",
            seq
        );
        self.heap.push(Reverse(Pending { seq, payload }));
    }

    /// Pop the smallest entry only if it is `seq`.
    fn pop_if_front(&mut self, seq: usize) -> Option<Vec<u8>> {
        match self.heap.peek() {
            Some(Reverse(front)) if front.seq == seq => {
                self.heap.pop().map(|Reverse(p)| p.payload)
            }
            _ => None,
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Streaming merger state. Feed results with [`Merger::accept`]; call [`Merger::finish`]
/// once the result source is exhausted.
#[derive(Default)]
pub struct Merger {
    pending: PendingSet,
    next_expected: usize,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number of the next payload to be released (= number released so far).
    pub fn next_expected(&self) -> usize {
        self.next_expected
    }

    /// Number of results held back waiting for an earlier one.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Take one result. A failed job is returned as the error immediately; otherwise the result
    /// is buffered and every payload now contiguous with `next_expected` is handed to `sink`.
    /// Returns how many payloads were released by this call.
    ///
    /// Panics on a duplicate sequence number, whether the earlier copy was already released
    /// or is still pending.
    pub fn accept<F>(&mut self, result: JobResult, sink: &mut F) -> Result<usize>
    where
        F: FnMut(usize, &[u8]) -> Result<()>,
    {
        let payload = result.outcome?;
        assert!(
            result.seq >= self.next_expected,
            "sequence number {} already released",
            result.seq
        );
        self.pending.push(result.seq, payload);

        let mut released = 0;
        while let Some(payload) = self.pending.pop_if_front(self.next_expected) {
            sink(self.next_expected, &payload)?;
            self.next_expected += 1;
            released += 1;
        }
        Ok(released)
    }

    /// Close the merger after the last result. Returns the total number released.
    ///
    /// Panics if results are still pending: numbering was not dense or a result was lost.
    pub fn finish(self) -> usize {
        assert!(
            self.pending.is_empty(),
            "merger still holds {} results at exhaustion (next expected {})",
            self.pending.len(),
            self.next_expected
        );
        self.next_expected
    }
}

/// Drain `results` through a [`Merger`], calling `sink(seq, payload)` in order.
/// Stops at the first failed job or sink error; the rest of `results` is not consumed.
pub fn merge_in_order<I, F>(results: I, mut sink: F) -> Result<usize>
where
    I: IntoIterator<Item = JobResult>,
    F: FnMut(usize, &[u8]) -> Result<()>,
{
    let mut merger = Merger::new();
    for result in results {
        merger.accept(result, &mut sink)?;
    }
    let released = merger.finish();
    debug!("merger: source exhausted, released {} payloads", released);
    Ok(released)
}
