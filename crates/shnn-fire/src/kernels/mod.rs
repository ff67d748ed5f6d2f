//! Typed spike-encoding kernels
//!
//! Each kernel comes as a serial `*_block` body working on one contiguous
//! block and a parallel wrapper that partitions its extent over the current
//! rayon pool. All wrappers return after every block has finished.

pub mod quantize;
pub mod rank;
pub mod rate;
pub mod threshold;

pub use quantize::{quantize, quantize_block};
pub use rank::{rank_fire, rank_fire_block, rank_infinite};
pub use rate::{fire_step, rate_fire, RateScratch};
pub use threshold::{threshold, threshold_block};
