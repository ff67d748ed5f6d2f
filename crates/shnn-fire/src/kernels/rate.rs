//! Rate coding: cumulative threshold-crossing counts over time
//!
//! For one neuron the encoder keeps a reference value (the input that caused
//! the last spike, initially zero) and a running spike count. At every time
//! step it fires when `reference + threshold < input`, which increments the
//! count and moves the reference to the current input. The output at
//! `(z, y, x)` is the count after step `y`, so each feature's sequence is
//! non-decreasing and slice `y - 1` holds the final count.
//!
//! Time is a true data dependency, so only the batch axis is parallel.
//! Reference values and running counts live in a call-scoped
//! [`RateScratch`] with one row per [`BatchPlan`] block rather than one per
//! batch item; each row is reset before every batch item that uses it.

use crate::dtype::Scalar;
use crate::error::{FireError, Result};
use crate::parallel::BatchPlan;
use crate::tensor::{View3, View3Mut};
use rayon::prelude::*;

/// Per-row encoder state, `rows x width` for both buffers
#[derive(Debug)]
pub struct RateScratch<I, O> {
    values: Vec<I>,
    counts: Vec<O>,
    width: usize,
}

impl<I: Scalar, O: Scalar> RateScratch<I, O> {
    /// Allocate `rows` zeroed rows of `width` features
    pub fn new(rows: usize, width: usize) -> Self {
        Self {
            values: vec![I::ZERO; rows * width],
            counts: vec![O::ZERO; rows * width],
            width,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.values.len() / self.width
        }
    }

    fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = (&mut [I], &mut [O])> {
        self.values
            .par_chunks_mut(self.width)
            .zip(self.counts.par_chunks_mut(self.width))
    }
}

/// Advance one time step for a row of features
///
/// `input`, `values` and `counts` must have the same length.
pub fn fire_step<I: Scalar, O: Scalar>(input: &[I], values: &mut [I], counts: &mut [O], threshold: I) {
    for ((&v, reference), count) in input.iter().zip(values.iter_mut()).zip(counts.iter_mut()) {
        if reference.fires(threshold, v) {
            *count = count.increment();
            *reference = v;
        }
    }
}

/// Encode one batch item of `y` steps into `output`, using one scratch row
fn encode_item<I: Scalar, O: Scalar>(
    input: &[I],
    output: &mut [O],
    values: &mut [I],
    counts: &mut [O],
    threshold: I,
) {
    values.fill(I::ZERO);
    counts.fill(O::ZERO);

    let width = values.len();
    for (step_in, step_out) in input.chunks_exact(width).zip(output.chunks_exact_mut(width)) {
        fire_step(step_in, values, counts, threshold);
        step_out.copy_from_slice(counts);
    }
}

/// Rate-encode `input` into cumulative spike counts in `output`
///
/// Both views must have the same `(z, y, x)` extents; their element types may
/// differ. Every element of `output` is overwritten. Empty extents are a
/// no-op.
pub fn rate_fire<I: Scalar, O: Scalar>(
    input: View3<'_, I>,
    mut output: View3Mut<'_, O>,
    threshold: I,
) -> Result<()> {
    let (z, y, x) = input.dims();
    if input.dims() != output.dims() {
        let (oz, oy, ox) = output.dims();
        return Err(FireError::shape_mismatch("rate_fire", &[z, y, x], &[oz, oy, ox]));
    }
    if z == 0 || y == 0 || x == 0 {
        return Ok(());
    }

    let plan = BatchPlan::for_current_pool(z);
    let mut scratch = RateScratch::<I, O>::new(plan.rows(), x);
    log::trace!(
        "rate_fire<{}, {}>: shape [{}, {}, {}], {} scratch rows of {} items",
        I::TYPE,
        O::TYPE,
        z,
        y,
        x,
        plan.rows(),
        plan.batches_per_row()
    );

    // carve the output into the per-row batch ranges of the plan
    let item = y * x;
    let mut rest = output.as_mut_slice();
    let mut blocks = Vec::with_capacity(plan.rows());
    for row in 0..plan.rows() {
        let batches = plan.batches_of(row);
        let (head, tail) = core::mem::take(&mut rest).split_at_mut(batches.len() * item);
        blocks.push((batches, head));
        rest = tail;
    }

    blocks
        .into_par_iter()
        .zip(scratch.par_rows_mut())
        .for_each(|((batches, output), (values, counts))| {
            for (z, item_out) in batches.zip(output.chunks_exact_mut(item)) {
                encode_item(input.batch(z), item_out, values, counts, threshold);
            }
        });

    Ok(())
}
