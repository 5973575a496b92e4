//! Splitting buffers into codec-sized chunks and joining them back

use crate::reed_solomon::{RsError, RsResult};

/// Split `data` into chunks of `chunk_size`; the last chunk holds the remainder
pub fn chunk_data<T: Clone>(data: &[T], chunk_size: usize) -> RsResult<Vec<Vec<T>>> {
    if chunk_size == 0 {
        return Err(RsError::InvalidChunkSize);
    }
    if data.is_empty() {
        return Err(RsError::EmptyData);
    }

    Ok(data.chunks(chunk_size).map(<[T]>::to_vec).collect())
}

/// Concatenate chunks in order
pub fn assemble_chunks<T: Clone>(chunks: &[Vec<T>]) -> Vec<T> {
    let total: usize = chunks.iter().map(Vec::len).sum();
    let mut assembled = Vec::with_capacity(total);
    for chunk in chunks {
        assembled.extend_from_slice(chunk);
    }
    assembled
}
