//! Fixed-size upload batching.

/// Number of upload entries per request, bounding the payload size.
pub const UPLOAD_BATCH_SIZE: usize = 64;

/// Split items into consecutive batches of at most `batch_size`.
///
/// N items produce ceil(N / batch_size) batches; the last batch holds the
/// remainder (or a full batch when N divides evenly). Order is preserved.
pub fn into_batches<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    assert!(batch_size > 0, "batch size must be positive");

    let mut batches = Vec::with_capacity(items.len().div_ceil(batch_size));
    let mut batch = Vec::with_capacity(batch_size.min(items.len()));
    for item in items {
        batch.push(item);
        if batch.len() == batch_size {
            batches.push(std::mem::take(&mut batch));
        }
    }
    if !batch.is_empty() {
        batches.push(batch);
    }
    batches
}
