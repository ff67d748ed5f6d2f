//! Activation-to-spike encoding kernels for the hSNN CPU backend
//!
//! This crate turns continuous activation tensors into spike representations
//! for the two encoding schemes used by the simulation layer:
//!
//! - **rank-order coding**: a neuron fires once and the time slot of the spike
//!   encodes its magnitude ([`kernels::rank_fire`], [`kernels::rank_infinite`]);
//! - **rate coding**: the number of threshold crossings accumulated over the
//!   time axis encodes magnitude ([`kernels::rate_fire`]).
//!
//! Two elementwise helpers, [`kernels::threshold`] and [`kernels::quantize`],
//! complete the surface. Typed kernels live in [`kernels`] and run on the
//! current rayon pool; [`CpuDevice`] wraps them behind runtime-typed
//! [`Tensor`]s and a dedicated worker pool.
//!
//! ```
//! use shnn_fire::{CpuDevice, ScalarType, Shape, Tensor};
//!
//! let device = CpuDevice::with_threads(2)?;
//! let input = Tensor::from_vec(vec![1.0f32, 4.0, 4.0, 9.0], Shape::d3(1, 4, 1))?;
//! let mut counts = Tensor::zeros(ScalarType::U8, Shape::d3(1, 4, 1));
//! device.rate_fire(&input, &mut counts, 2.0)?;
//! assert_eq!(counts.as_slice::<u8>()?, &[0, 1, 1, 2]);
//! # Ok::<(), shnn_fire::FireError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod device;
mod dispatch;
pub mod dtype;
pub mod error;
pub mod kernels;
pub mod parallel;
pub mod tensor;

// Re-export essential types
pub use config::{FireConfig, THREADS_ENV};
pub use device::CpuDevice;
pub use dtype::{Scalar, ScalarType};
pub use error::{FireError, Result};
pub use parallel::{BatchPlan, Partition};
pub use tensor::{Shape, Tensor, TensorData, View3, View3Mut};
