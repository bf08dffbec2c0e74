use crate::foundation::core::{RowRange, WorkerIdentity};

/// Contiguous block of rows owned by `rank` in a group of `worker_count`.
///
/// Every worker gets `height / worker_count` rows; the last worker also takes the remainder.
/// With more workers than rows, all but the last worker get an empty range.
///
/// Callers guarantee `worker_count >= 1` and `rank < worker_count`.
pub fn partition(height: u32, worker_count: usize, rank: usize) -> RowRange {
    debug_assert!(worker_count >= 1 && rank < worker_count);
    let per_worker = height / worker_count as u32;
    let start = rank as u32 * per_worker;
    let end = if rank + 1 == worker_count {
        height
    } else {
        start + per_worker
    };
    RowRange { start, end }
}

/// [`partition`] for a [`WorkerIdentity`].
pub fn rows_for(height: u32, id: WorkerIdentity) -> RowRange {
    partition(height, id.size, id.rank)
}

/// Largest range length handed out for `(height, worker_count)`.
///
/// This is always the last worker's share.
pub fn max_rows(height: u32, worker_count: usize) -> u32 {
    partition(height, worker_count, worker_count - 1).len_rows()
}

/// Ranges for every rank, in rank order.
pub fn all_ranges(height: u32, worker_count: usize) -> Vec<RowRange> {
    (0..worker_count)
        .map(|rank| partition(height, worker_count, rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(height: u32, workers: usize) -> Vec<(u32, u32)> {
        all_ranges(height, workers)
            .into_iter()
            .map(|r| (r.start, r.end))
            .collect()
    }

    #[test]
    fn even_split() {
        assert_eq!(ranges(4, 2), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn last_worker_absorbs_remainder() {
        assert_eq!(ranges(10, 3), vec![(0, 3), (3, 6), (6, 10)]);
        assert_eq!(max_rows(10, 3), 4);
    }

    #[test]
    fn more_workers_than_rows_leaves_empty_ranges() {
        assert_eq!(ranges(2, 4), vec![(0, 0), (0, 0), (0, 0), (0, 2)]);
        assert_eq!(max_rows(2, 4), 2);
    }

    #[test]
    fn single_worker_takes_everything() {
        assert_eq!(ranges(7, 1), vec![(0, 7)]);
    }

    #[test]
    fn ranges_tile_the_height_exactly_once() {
        for height in 1..=64u32 {
            for workers in 1..=height as usize {
                let mut next = 0;
                for r in all_ranges(height, workers) {
                    assert_eq!(r.start, next, "gap/overlap h={height} w={workers}");
                    assert!(r.start <= r.end);
                    next = r.end;
                }
                assert_eq!(next, height, "h={height} w={workers}");
            }
        }
    }
}
