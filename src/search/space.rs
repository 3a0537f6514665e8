//! Search space and its partitioning across workers.

use crate::error::{Result, SearchError};
use crate::search::config::MAX_WORKERS;

/// Inclusive range of candidates to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSpace {
    start: u64,
    end: u64,
}

impl SearchSpace {
    /// Create a space covering `start..=end`.
    ///
    /// Fails when `start > end`, or when the range is the whole of `u64`
    /// (its size would not be representable).
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(SearchError::InvalidSpace { start, end });
        }
        if (end - start).checked_add(1).is_none() {
            return Err(SearchError::SpaceTooLarge { start, end });
        }
        Ok(Self { start, end })
    }

    /// Space of all `digits`-digit decimal codes, `0..=10^digits - 1`.
    pub fn decimal_digits(digits: u32) -> Result<Self> {
        match 10u64.checked_pow(digits) {
            Some(n) if n > 0 => Self::new(0, n - 1),
            _ => Err(SearchError::SpaceTooLarge {
                start: 0,
                end: u64::MAX,
            }),
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of candidates in the space. Always at least one.
    pub fn size(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// One worker's contiguous slice of the space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub worker_id: usize,
    pub start: u64,
    pub end: u64,
}

impl Partition {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn candidates(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

/// Split `space` into disjoint contiguous partitions, one per worker.
///
/// `worker_count` is capped at [`MAX_WORKERS`] and at the space size, so
/// every partition holds at least one candidate. The last partition absorbs
/// the remainder of the integer division.
pub fn partition(space: SearchSpace, worker_count: usize) -> Result<Vec<Partition>> {
    if worker_count == 0 {
        return Err(SearchError::InvalidWorkerCount(worker_count));
    }

    let size = space.size();
    let workers = (worker_count.min(MAX_WORKERS) as u64).min(size);
    let chunk = size / workers;

    let partitions = (0..workers)
        .map(|i| {
            let start = space.start + i * chunk;
            let end = if i == workers - 1 {
                space.end
            } else {
                start + chunk - 1
            };
            Partition {
                worker_id: i as usize,
                start,
                end,
            }
        })
        .collect();

    Ok(partitions)
}
