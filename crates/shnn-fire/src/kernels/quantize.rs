//! Two-level quantization around a midpoint

use crate::dtype::Scalar;
use crate::parallel::Partition;
use rayon::prelude::*;

/// Map every element to `lower` if it is below `middle`, otherwise to `upper`
pub fn quantize_block<T: Scalar>(input: &mut [T], lower: T, middle: T, upper: T) {
    for v in input.iter_mut() {
        *v = if *v < middle { lower } else { upper };
    }
}

/// Parallel [`quantize_block`] over the whole buffer
pub fn quantize<T: Scalar>(input: &mut [T], lower: T, middle: T, upper: T) {
    let partition = Partition::for_current_pool(input.len());
    log::trace!(
        "quantize<{}>: {} elements, block {}",
        T::TYPE,
        input.len(),
        partition.block_size()
    );

    input
        .par_chunks_mut(partition.block_size())
        .for_each(|block| quantize_block(block, lower, middle, upper));
}
