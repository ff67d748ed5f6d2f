//! Rank-order coding primitives
//!
//! In rank-order coding a neuron fires at most once, and the time slot of
//! that spike encodes its magnitude. `rank_fire` turns one slot of
//! activations into a 0/1 spike indicator; `rank_infinite` stamps the last
//! slot of every batch item with a sentinel that downstream code reads as
//! "never fired".

use crate::dtype::Scalar;
use crate::error::{FireError, Result};
use crate::parallel::Partition;
use crate::tensor::View3Mut;
use rayon::prelude::*;

/// Write `1` where `input > threshold`, `0` elsewhere
///
/// Equality does not fire. `input` and `output` must have the same length.
pub fn rank_fire_block<I: Scalar, O: Scalar>(input: &[I], output: &mut [O], threshold: I) {
    for (out, &v) in output.iter_mut().zip(input) {
        *out = if v > threshold { O::ONE } else { O::ZERO };
    }
}

/// Parallel [`rank_fire_block`]
pub fn rank_fire<I: Scalar, O: Scalar>(input: &[I], output: &mut [O], threshold: I) -> Result<()> {
    if input.len() != output.len() {
        return Err(FireError::shape_mismatch(
            "rank_fire",
            &[input.len()],
            &[output.len()],
        ));
    }

    let partition = Partition::for_current_pool(input.len());
    log::trace!(
        "rank_fire<{}, {}>: {} elements, block {}",
        I::TYPE,
        O::TYPE,
        input.len(),
        partition.block_size()
    );

    input
        .par_chunks(partition.block_size())
        .zip(output.par_chunks_mut(partition.block_size()))
        .for_each(|(input, output)| rank_fire_block(input, output, threshold));

    Ok(())
}

/// Fill slice `y - 1` of every batch item with `value`
///
/// Other time slices are left untouched. Tensors with an empty time or
/// feature axis are left as they are.
pub fn rank_infinite<T: Scalar>(mut tensor: View3Mut<'_, T>, value: T) {
    let (z, y, x) = tensor.dims();
    if y == 0 || x == 0 {
        return;
    }
    log::trace!("rank_infinite<{}>: shape [{}, {}, {}]", T::TYPE, z, y, x);

    let last = (y - 1) * x;
    tensor
        .as_mut_slice()
        .par_chunks_mut(y * x)
        .for_each(|batch| batch[last..].fill(value));
}
