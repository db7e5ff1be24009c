//! Fetch worker span helpers.

use tracing::Span;

/// Start a span covering one worker's chunk.
///
/// The `worker.records` field is declared empty and filled by
/// [`record_worker_output`] when the chunk is done.
pub fn start_worker_span(worker_id: usize, chunk_len: usize) -> Span {
    tracing::info_span!(
        "report.worker",
        "worker.id" = worker_id,
        "worker.items" = chunk_len,
        "worker.records" = tracing::field::Empty,
    )
}

/// Record how many report lines a worker produced.
pub fn record_worker_output(span: &Span, records: usize) {
    span.record("worker.records", records);
}
