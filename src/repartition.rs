use std::ops::Range;

use crate::error::BalanceError;
use crate::error::Result;

/// A contiguous part of the combined collection, assigned to one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub len: usize,
}

impl Chunk {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn slice<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        &data[self.range()]
    }
}

/// Splits `total_count` items into `worker_count` contiguous chunks.
/// Every chunk has `total_count / worker_count` items, except for the
/// last one which also takes the remainder of the division.
/// Only the total is taken into account, not where the items came from.
pub fn compute_chunks(total_count: usize, worker_count: usize) -> Result<Vec<Chunk>> {
    if worker_count == 0 {
        return Err(BalanceError::InvalidWorkerCount(worker_count));
    }
    let base_len = total_count / worker_count;
    let remainder = total_count % worker_count;
    Ok((0..worker_count)
        .map(|i| Chunk {
            start: i * base_len,
            len: if i == worker_count - 1 {
                base_len + remainder
            } else {
                base_len
            },
        })
        .collect())
}
