//! Streaming line stage: split released payloads into lines, filter each, accumulate.

use crate::engine::tools::trim_space_end;

/// Per-line or whole-text byte transformation.
pub type ByteFilter<'a> = &'a dyn Fn(&[u8]) -> Vec<u8>;

/// Accumulates filtered lines in release order.
pub struct LineStage<'a> {
    line_filter: ByteFilter<'a>,
    out: Vec<u8>,
    lines: usize,
}

impl<'a> LineStage<'a> {
    pub fn new(line_filter: ByteFilter<'a>) -> Self {
        Self {
            line_filter,
            out: Vec::new(),
            lines: 0,
        }
    }

    /// Append one payload. Lines are `\n`-delimited (a missing final newline still ends a line),
    /// trailing Unicode whitespace is trimmed, and a line filtered down to nothing is kept
    /// as an empty line.
    pub fn push_payload(&mut self, payload: &[u8]) {
        for raw in payload.split_inclusive(|&b| b == b'\n') {
            let line = trim_space_end(raw);
            self.out.extend_from_slice(&(self.line_filter)(line));
            self.out.push(b'\n');
            self.lines += 1;
        }
    }

    /// Lines emitted so far.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Accumulated text before the text filter.
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// Apply `text_filter` once to everything accumulated and return it.
    pub fn finish(self, text_filter: ByteFilter<'_>) -> Vec<u8> {
        text_filter(&self.out)
    }
}
