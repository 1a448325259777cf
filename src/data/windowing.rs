// ============================================================
// Layer 4 — Token Window Planner
// ============================================================
// Splits a document's token sequence into overlapping windows
// that each fit into one embedding call.
//
//   - len <= window_size  → a single window covering everything
//   - len >  window_size  → windows at offsets 0, stride, 2*stride, ...
//                           each [offset, offset + window_size) clipped
//                           to len; the first window that reaches len
//                           is the last one
//
// The planner works on lengths only. The encoder slices the
// real token ids with the returned ranges.

use crate::domain::window::Window;

/// Plan the windows of one document.
///
/// Always returns at least one window. An empty token sequence gets a
/// single empty window so the document still owns one vector.
/// Callers must have validated `0 < stride <= window_size`.
pub fn plan_windows(
    doc_index:   usize,
    token_len:   usize,
    window_size: usize,
    stride:      usize,
) -> Vec<Window> {
    if token_len <= window_size {
        return vec![Window { doc_index, start: 0, end: token_len }];
    }

    let mut windows = Vec::with_capacity(window_count(token_len, window_size, stride));
    let mut start   = 0usize;

    loop {
        let end = (start + window_size).min(token_len);
        windows.push(Window { doc_index, start, end });

        // The window that reaches the final token is the terminal one
        if end == token_len {
            break;
        }

        start += stride;
    }

    windows
}

/// Number of windows `plan_windows` produces for a sequence of `token_len`.
pub fn window_count(token_len: usize, window_size: usize, stride: usize) -> usize {
    if token_len <= window_size {
        return 1;
    }
    // Windows start at k*stride for k = 0..=K where K is the first
    // index with k*stride + window_size >= token_len.
    let remaining = token_len - window_size;
    remaining.div_ceil(stride) + 1
}
