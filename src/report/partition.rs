//! Splits the work list into contiguous per-worker chunks.

use super::WorkItem;

/// Split `items` into consecutive chunks of `ceil(len / workers)` items.
///
/// Every chunk but the last is full; the last holds the remainder. An empty
/// input yields no chunks. Fewer than `workers` chunks can come back: 9 items
/// over 8 workers is four chunks of two plus one of one. A `workers` of 0 is
/// treated as 1.
pub fn partition(items: &[WorkItem], workers: usize) -> Vec<Vec<WorkItem>> {
    if items.is_empty() {
        return Vec::new();
    }
    let chunk_size = items.len().div_ceil(workers.max(1));
    items.chunks(chunk_size).map(<[WorkItem]>::to_vec).collect()
}
