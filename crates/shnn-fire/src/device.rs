//! Runtime-typed entry points on a dedicated CPU worker pool
//!
//! [`CpuDevice`] owns a rayon pool sized by [`FireConfig`]. Each method
//! validates shapes, resolves the tensors' scalar types once, converts the
//! `f64` parameters to the operand type and runs the typed kernel inside the
//! pool, so the pool's worker count drives the block partitioning.

use crate::config::FireConfig;
use crate::dispatch::{dispatch_mut, dispatch_ref};
use crate::dtype::Scalar;
use crate::error::{FireError, Result};
use crate::kernels;
use crate::tensor::{Tensor, View3, View3Mut};

/// CPU backend for the spike-encoding kernels
#[derive(Debug)]
pub struct CpuDevice {
    pool: rayon::ThreadPool,
    config: FireConfig,
}

impl CpuDevice {
    /// Build a device and its worker pool
    pub fn new(config: FireConfig) -> Result<Self> {
        config.validate()?;

        let prefix = config.thread_name_prefix.clone();
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(move |i| format!("{}-{}", prefix, i));
        if let Some(n) = config.num_threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build()?;

        log::debug!(
            "CPU fire device ready: {} workers",
            pool.current_num_threads()
        );
        Ok(Self { pool, config })
    }

    /// Device with exactly `num_threads` workers
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        Self::new(FireConfig::new(num_threads)?)
    }

    /// Device configured from the environment (see [`FireConfig::from_env`])
    pub fn from_env() -> Result<Self> {
        Self::new(FireConfig::from_env()?)
    }

    /// Number of workers in the pool
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Configuration the device was built with
    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    /// Run `op` inside the device's pool, e.g. to call typed kernels directly
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// In place: every element `<= threshold` becomes `value`
    pub fn threshold(&self, tensor: &mut Tensor, threshold: f64, value: f64) -> Result<()> {
        log::trace!(
            "threshold: {} {:?}",
            tensor.scalar_type(),
            tensor.shape().dims()
        );
        let data = tensor.data_mut();
        self.pool.install(|| {
            dispatch_mut!(data, values => kernels::threshold(
                values,
                Scalar::from_f64(threshold),
                Scalar::from_f64(value),
            ))
        });
        Ok(())
    }

    /// In place: fill time slice `y - 1` of every batch item with `value`
    pub fn rank_infinite(&self, tensor: &mut Tensor, value: f64) -> Result<()> {
        let (z, y, x) = tensor.shape().dims3("rank_infinite")?;
        log::trace!("rank_infinite: {} [{}, {}, {}]", tensor.scalar_type(), z, y, x);

        let data = tensor.data_mut();
        self.pool.install(|| {
            dispatch_mut!(data, values => View3Mut::new(values, z, y, x)
                .map(|view| kernels::rank_infinite(view, Scalar::from_f64(value))))
        })
    }

    /// `output[i] = 1` where `input[i] > threshold`, else `0`
    ///
    /// Both tensors must hold the same number of elements; their scalar
    /// types may differ. The threshold is converted to the input type.
    pub fn rank_fire(&self, input: &Tensor, output: &mut Tensor, threshold: f64) -> Result<()> {
        if input.numel() != output.numel() {
            return Err(FireError::shape_mismatch(
                "rank_fire",
                input.shape().dims(),
                output.shape().dims(),
            ));
        }
        log::trace!(
            "rank_fire: {} -> {}, {} elements",
            input.scalar_type(),
            output.scalar_type(),
            input.numel()
        );

        let output = output.data_mut();
        self.pool.install(|| {
            dispatch_ref!(input.data(), i => dispatch_mut!(output, o => kernels::rank_fire(
                i,
                o,
                Scalar::from_f64(threshold),
            )))
        })
    }

    /// Cumulative rate-coded spike counts of a `(batch, time, feature)` input
    ///
    /// `input` and `output` must be rank-3 with identical shapes; their
    /// scalar types may differ. The threshold is converted to the input type.
    pub fn rate_fire(&self, input: &Tensor, output: &mut Tensor, threshold: f64) -> Result<()> {
        let (z, y, x) = input.shape().dims3("rate_fire")?;
        output.shape().dims3("rate_fire")?;
        if input.shape() != output.shape() {
            return Err(FireError::shape_mismatch(
                "rate_fire",
                input.shape().dims(),
                output.shape().dims(),
            ));
        }
        log::trace!(
            "rate_fire: {} -> {} [{}, {}, {}] on {} workers",
            input.scalar_type(),
            output.scalar_type(),
            z,
            y,
            x,
            self.num_threads()
        );

        let output = output.data_mut();
        self.pool.install(|| {
            dispatch_ref!(input.data(), i => dispatch_mut!(output, o => kernels::rate_fire(
                View3::new(i, z, y, x)?,
                View3Mut::new(o, z, y, x)?,
                Scalar::from_f64(threshold),
            )))
        })
    }

    /// In place: elements below `middle` become `lower`, the rest `upper`
    pub fn quantize(&self, tensor: &mut Tensor, lower: f64, middle: f64, upper: f64) -> Result<()> {
        log::trace!(
            "quantize: {} {:?}",
            tensor.scalar_type(),
            tensor.shape().dims()
        );
        let data = tensor.data_mut();
        self.pool.install(|| {
            dispatch_mut!(data, values => kernels::quantize(
                values,
                Scalar::from_f64(lower),
                Scalar::from_f64(middle),
                Scalar::from_f64(upper),
            ))
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::ScalarType;
    use crate::tensor::Shape;

    fn device() -> CpuDevice {
        CpuDevice::with_threads(3).unwrap()
    }

    #[test]
    fn test_device_worker_count() {
        let device = device();
        assert_eq!(device.num_threads(), 3);
        assert_eq!(device.config().num_threads, Some(3));
        assert_eq!(device.install(rayon::current_num_threads), 3);
    }

    #[test]
    fn test_device_rejects_invalid_config() {
        assert!(CpuDevice::with_threads(0).is_err());
        let config = FireConfig::default().with_thread_name_prefix("");
        assert!(CpuDevice::new(config).is_err());
    }

    #[test]
    fn test_threshold_converts_parameters() {
        let mut t = Tensor::from_vec(vec![1u8, 5, 3, 7], Shape::d1(4)).unwrap();
        device().threshold(&mut t, 3.0, 0.0).unwrap();
        assert_eq!(t.as_slice::<u8>().unwrap(), &[0, 5, 0, 7]);
    }

    #[test]
    fn test_rank_infinite_requires_rank3() {
        let mut t = Tensor::zeros(ScalarType::F32, Shape::d1(4));
        let err = device().rank_infinite(&mut t, -1.0).unwrap_err();
        assert!(matches!(err, FireError::InvalidRank { expected: 3, got: 1, .. }));
    }

    #[test]
    fn test_rank_fire_across_types() {
        let input = Tensor::from_vec(vec![2.0f64, 5.0, 5.0, 8.0], Shape::d1(4)).unwrap();
        let mut output = Tensor::zeros(ScalarType::I8, Shape::d1(4));
        device().rank_fire(&input, &mut output, 5.0).unwrap();
        assert_eq!(output.as_slice::<i8>().unwrap(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_rank_fire_element_count_mismatch() {
        let input = Tensor::zeros(ScalarType::F32, Shape::d1(4));
        let mut output = Tensor::zeros(ScalarType::F32, Shape::d1(5));
        assert!(matches!(
            device().rank_fire(&input, &mut output, 0.0),
            Err(FireError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_rate_fire_shape_checks() {
        let input = Tensor::zeros(ScalarType::F32, Shape::d3(2, 3, 4));
        let mut flat = Tensor::zeros(ScalarType::U16, Shape::d1(24));
        assert!(matches!(
            device().rate_fire(&input, &mut flat, 0.0),
            Err(FireError::InvalidRank { .. })
        ));

        let mut other = Tensor::zeros(ScalarType::U16, Shape::d3(2, 4, 3));
        assert!(matches!(
            device().rate_fire(&input, &mut other, 0.0),
            Err(FireError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_quantize_float_tensor() {
        let mut t = Tensor::from_vec(vec![0.2f32, 0.5, 0.8], Shape::d1(3)).unwrap();
        device().quantize(&mut t, 0.0, 0.5, 1.0).unwrap();
        assert_eq!(t.as_slice::<f32>().unwrap(), &[0.0, 1.0, 1.0]);
    }
}
