//! Dense tensors consumed by the kernels
//!
//! [`Tensor`] is the runtime-typed container handed to
//! [`CpuDevice`](crate::CpuDevice); its element type is only known through
//! [`ScalarType`]. The typed kernels work on plain slices and on the borrowed
//! 3-axis views [`View3`] / [`View3Mut`], laid out `(batch, time, feature)`
//! with the feature axis contiguous.

use crate::dispatch::dispatch_ref;
use crate::dtype::{Scalar, ScalarType};
use crate::error::{FireError, Result};

/// Tensor dimensions, outermost first
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a shape from its dimensions
    pub fn new(dims: impl Into<Vec<usize>>) -> Self {
        Self { dims: dims.into() }
    }

    /// 1-axis shape of `len` elements
    pub fn d1(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// 3-axis shape `(batch, time, feature)`
    pub fn d3(z: usize, y: usize, x: usize) -> Self {
        Self { dims: vec![z, y, x] }
    }

    /// Dimensions, outermost first
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements, or `None` if it does not fit in `usize`
    pub fn checked_numel(&self) -> Option<usize> {
        element_count(&self.dims)
    }

    /// Total number of elements, saturating at `usize::MAX`
    pub fn numel(&self) -> usize {
        self.checked_numel().unwrap_or(usize::MAX)
    }

    /// Extents `(z, y, x)` of a rank-3 shape
    pub fn dims3(&self, operation: &'static str) -> Result<(usize, usize, usize)> {
        match self.dims.as_slice() {
            &[z, y, x] => Ok((z, y, x)),
            other => Err(FireError::invalid_rank(operation, 3, other.len())),
        }
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

/// Owned element buffer of one of the supported scalar types
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum TensorData {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl TensorData {
    /// Zero-filled buffer of `len` elements of type `dtype`
    pub fn zeros(dtype: ScalarType, len: usize) -> Self {
        match dtype {
            ScalarType::I8 => TensorData::I8(vec![0; len]),
            ScalarType::I16 => TensorData::I16(vec![0; len]),
            ScalarType::I32 => TensorData::I32(vec![0; len]),
            ScalarType::I64 => TensorData::I64(vec![0; len]),
            ScalarType::U8 => TensorData::U8(vec![0; len]),
            ScalarType::U16 => TensorData::U16(vec![0; len]),
            ScalarType::U32 => TensorData::U32(vec![0; len]),
            ScalarType::U64 => TensorData::U64(vec![0; len]),
            ScalarType::F32 => TensorData::F32(vec![0.0; len]),
            ScalarType::F64 => TensorData::F64(vec![0.0; len]),
        }
    }

    /// Runtime tag of the stored elements
    pub fn scalar_type(&self) -> ScalarType {
        dispatch_ref!(self, data => scalar_type_of(data))
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        dispatch_ref!(self, data => data.len())
    }

    /// Whether the buffer holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn scalar_type_of<T: Scalar>(_: &[T]) -> ScalarType {
    T::TYPE
}

/// Runtime-typed dense tensor
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: TensorData,
    shape: Shape,
}

impl Tensor {
    /// Zero-filled tensor
    ///
    /// Panics if the element count of `shape` does not fit in memory.
    pub fn zeros(dtype: ScalarType, shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        Self {
            data: TensorData::zeros(dtype, shape.numel()),
            shape,
        }
    }

    /// Tensor from an owned buffer; the length must match the shape
    pub fn from_vec<T: Scalar>(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self> {
        Self::from_data(T::into_data(data), shape)
    }

    /// Tensor from a dynamic buffer; the length must match the shape
    pub fn from_data(data: TensorData, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        match shape.checked_numel() {
            Some(expected) if expected == data.len() => Ok(Self { data, shape }),
            expected => Err(FireError::LengthMismatch {
                expected: expected.unwrap_or(usize::MAX),
                got: data.len(),
            }),
        }
    }

    /// Element type
    pub fn scalar_type(&self) -> ScalarType {
        self.data.scalar_type()
    }

    /// Dimensions
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of elements
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Underlying buffer
    pub fn data(&self) -> &TensorData {
        &self.data
    }

    /// Underlying buffer, mutably
    pub fn data_mut(&mut self) -> &mut TensorData {
        &mut self.data
    }

    /// Consume the tensor, returning its buffer
    pub fn into_data(self) -> TensorData {
        self.data
    }

    /// Typed view of the elements
    pub fn as_slice<T: Scalar>(&self) -> Result<&[T]> {
        let got = self.scalar_type();
        T::from_data(&self.data).ok_or_else(|| FireError::type_mismatch(T::TYPE, got))
    }

    /// Typed mutable view of the elements
    pub fn as_mut_slice<T: Scalar>(&mut self) -> Result<&mut [T]> {
        let got = self.scalar_type();
        T::from_data_mut(&mut self.data).ok_or_else(|| FireError::type_mismatch(T::TYPE, got))
    }

    /// Elements widened to `f64`, in storage order
    pub fn to_vec_f64(&self) -> Vec<f64> {
        dispatch_ref!(&self.data, data => data.iter().map(|v| v.to_f64()).collect())
    }
}

/// Borrowed dense `(z, y, x)` view
#[derive(Debug, Clone, Copy)]
pub struct View3<'a, T> {
    data: &'a [T],
    z: usize,
    y: usize,
    x: usize,
}

impl<'a, T: Scalar> View3<'a, T> {
    /// Wrap `data`; its length must equal `z * y * x`
    pub fn new(data: &'a [T], z: usize, y: usize, x: usize) -> Result<Self> {
        check_len(data.len(), z, y, x)?;
        Ok(Self { data, z, y, x })
    }

    /// Extents `(z, y, x)`
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.z, self.y, self.x)
    }

    /// Flat element buffer
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// All `y * x` elements of batch item `z`
    pub fn batch(&self, z: usize) -> &'a [T] {
        let stride = self.y * self.x;
        &self.data[z * stride..(z + 1) * stride]
    }

}

/// Mutably borrowed dense `(z, y, x)` view
#[derive(Debug)]
pub struct View3Mut<'a, T> {
    data: &'a mut [T],
    z: usize,
    y: usize,
    x: usize,
}

impl<'a, T: Scalar> View3Mut<'a, T> {
    /// Wrap `data`; its length must equal `z * y * x`
    pub fn new(data: &'a mut [T], z: usize, y: usize, x: usize) -> Result<Self> {
        check_len(data.len(), z, y, x)?;
        Ok(Self { data, z, y, x })
    }

    /// Extents `(z, y, x)`
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.z, self.y, self.x)
    }

    /// Flat element buffer
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

}

/// Product of `dims`; an empty axis makes it zero even if the others overflow
fn element_count(dims: &[usize]) -> Option<usize> {
    if dims.contains(&0) {
        return Some(0);
    }
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

fn check_len(len: usize, z: usize, y: usize, x: usize) -> Result<()> {
    match element_count(&[z, y, x]) {
        Some(expected) if expected == len => Ok(()),
        expected => Err(FireError::LengthMismatch {
            expected: expected.unwrap_or(usize::MAX),
            got: len,
        }),
    }
}
