//! Block partitioning of kernel extents across workers
//!
//! Every kernel splits exactly one axis into contiguous blocks of
//! `ceil(len / workers)` elements, one block per worker. Blocks never overlap,
//! so workers share no mutable state and the only synchronization is the join
//! at the end of the parallel region.

use core::ops::Range;

/// Contiguous split of `0..len` into at most `workers` blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    block: usize,
}

impl Partition {
    /// Partition `len` items over `workers` workers (zero workers counts as one)
    pub fn new(len: usize, workers: usize) -> Self {
        let workers = workers.max(1);
        let block = (len / workers + usize::from(len % workers != 0)).max(1);
        Self { len, block }
    }

    /// Partition sized for the worker count of the current rayon pool
    pub fn for_current_pool(len: usize) -> Self {
        Self::new(len, rayon::current_num_threads())
    }

    /// Items per block (the last block may be shorter); never zero
    pub fn block_size(&self) -> usize {
        self.block
    }

    /// Number of non-empty blocks
    pub fn num_blocks(&self) -> usize {
        self.len / self.block + usize::from(self.len % self.block != 0)
    }

    /// Index range covered by block `index`
    pub fn block(&self, index: usize) -> Range<usize> {
        let start = index.saturating_mul(self.block).min(self.len);
        let end = start.saturating_add(self.block).min(self.len);
        start..end
    }
}

/// Assignment of batch items to scratch rows for sequential kernels
///
/// The batch axis is partitioned like any other extent, and block `g` owns
/// scratch row `g` for the whole call. A row is therefore only ever touched
/// by the single worker running block `g`, which walks its batch items one
/// after another. The number of rows is the number of blocks, which is
/// bounded by the worker count and independent of how large the batch is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    partition: Partition,
}

impl BatchPlan {
    /// Plan `batch` items over `workers` workers
    pub fn new(batch: usize, workers: usize) -> Self {
        Self {
            partition: Partition::new(batch, workers),
        }
    }

    /// Plan sized for the worker count of the current rayon pool
    pub fn for_current_pool(batch: usize) -> Self {
        Self {
            partition: Partition::for_current_pool(batch),
        }
    }

    /// Number of scratch rows to allocate
    pub fn rows(&self) -> usize {
        self.partition.num_blocks()
    }

    /// Batch items handled per row (the last row may handle fewer)
    pub fn batches_per_row(&self) -> usize {
        self.partition.block_size()
    }

    /// Batch items processed, in order, with scratch row `row`
    pub fn batches_of(&self, row: usize) -> Range<usize> {
        self.partition.block(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(p: &Partition) -> Vec<Range<usize>> {
        (0..p.num_blocks()).map(|b| p.block(b)).collect()
    }

    #[test]
    fn test_partition_block_size_rounds_up() {
        let p = Partition::new(10, 4);
        assert_eq!(p.block_size(), 3);
        assert_eq!(p.num_blocks(), 4);
        assert_eq!(ranges(&p), vec![0..3, 3..6, 6..9, 9..10]);
    }

    #[test]
    fn test_partition_fewer_items_than_workers() {
        let p = Partition::new(3, 8);
        assert_eq!(p.block_size(), 1);
        assert_eq!(p.num_blocks(), 3);
    }

    #[test]
    fn test_partition_empty_and_zero_workers() {
        let empty = Partition::new(0, 4);
        assert_eq!(empty.num_blocks(), 0);
        assert_eq!(empty.block(0), 0..0);

        let single = Partition::new(5, 0);
        assert_eq!(single.block_size(), 5);
        assert_eq!(single.num_blocks(), 1);
    }

    #[test]
    fn test_partition_covers_extent_exactly_once() {
        for len in 0..40 {
            for workers in 1..9 {
                let p = Partition::new(len, workers);
                assert!(p.num_blocks() <= workers);
                let mut seen = vec![0u32; len];
                for range in ranges(&p) {
                    assert!(!range.is_empty());
                    for i in range {
                        seen[i] += 1;
                    }
                }
                assert!(seen.iter().all(|&c| c == 1), "len={} workers={}", len, workers);
            }
        }
    }

    #[test]
    fn test_batch_plan_rows_are_exclusive() {
        let plan = BatchPlan::new(7, 3);
        assert_eq!(plan.rows(), 3);
        assert_eq!(plan.batches_per_row(), 3);
        assert_eq!(plan.batches_of(0), 0..3);
        assert_eq!(plan.batches_of(2), 6..7);

        let mut owner = vec![None; 7];
        for row in 0..plan.rows() {
            for z in plan.batches_of(row) {
                assert_eq!(owner[z].replace(row), None, "batch {} claimed twice", z);
            }
        }
        assert!(owner.iter().all(Option::is_some));
    }

    #[test]
    fn test_partition_near_usize_max() {
        let p = Partition::new(usize::MAX, 2);
        assert_eq!(p.block_size(), usize::MAX / 2 + 1);
        assert_eq!(p.num_blocks(), 2);
        assert_eq!(p.block(1), usize::MAX / 2 + 1..usize::MAX);
    }

    #[test]
    fn test_batch_plan_rows_bounded_by_workers_not_batch() {
        let plan = BatchPlan::new(1000, 4);
        assert_eq!(plan.rows(), 4);
        let plan = BatchPlan::new(2, 16);
        assert_eq!(plan.rows(), 2);
    }
}
