//! Elementwise threshold clamp

use crate::dtype::Scalar;
use crate::parallel::Partition;
use rayon::prelude::*;

/// Replace every element `<= threshold` with `value`
pub fn threshold_block<T: Scalar>(input: &mut [T], threshold: T, value: T) {
    for v in input.iter_mut() {
        if *v <= threshold {
            *v = value;
        }
    }
}

/// Parallel [`threshold_block`] over the whole buffer
pub fn threshold<T: Scalar>(input: &mut [T], threshold: T, value: T) {
    let partition = Partition::for_current_pool(input.len());
    log::trace!(
        "threshold<{}>: {} elements, block {}",
        T::TYPE,
        input.len(),
        partition.block_size()
    );

    input
        .par_chunks_mut(partition.block_size())
        .for_each(|block| threshold_block(block, threshold, value));
}
