//! Runtime scalar-type tags and the per-type kernel arithmetic
//!
//! The set of supported element types is closed: every [`ScalarType`] has
//! exactly one Rust type implementing [`Scalar`], and every dynamic tensor
//! stores one of them in the matching [`TensorData`] variant.

use crate::error::{FireError, Result};
use crate::tensor::TensorData;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Runtime tag naming the element type of a tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScalarType {
    /// Signed 8-bit integer
    I8,
    /// Signed 16-bit integer
    I16,
    /// Signed 32-bit integer
    I32,
    /// Signed 64-bit integer
    I64,
    /// Unsigned 8-bit integer
    U8,
    /// Unsigned 16-bit integer
    U16,
    /// Unsigned 32-bit integer
    U32,
    /// Unsigned 64-bit integer
    U64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl ScalarType {
    /// Every supported type, in tag order
    pub const ALL: [ScalarType; 10] = [
        ScalarType::I8,
        ScalarType::I16,
        ScalarType::I32,
        ScalarType::I64,
        ScalarType::U8,
        ScalarType::U16,
        ScalarType::U32,
        ScalarType::U64,
        ScalarType::F32,
        ScalarType::F64,
    ];

    /// Short lowercase name (`"f32"`, `"u8"`, ...)
    pub const fn name(&self) -> &'static str {
        match self {
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
        }
    }

    /// Size of one element in bytes
    pub const fn size_in_bytes(&self) -> usize {
        match self {
            ScalarType::I8 | ScalarType::U8 => 1,
            ScalarType::I16 | ScalarType::U16 => 2,
            ScalarType::I32 | ScalarType::U32 | ScalarType::F32 => 4,
            ScalarType::I64 | ScalarType::U64 | ScalarType::F64 => 8,
        }
    }

    /// Whether this is a floating-point type
    pub const fn is_float(&self) -> bool {
        matches!(self, ScalarType::F32 | ScalarType::F64)
    }

    /// Whether this type can hold negative values
    pub const fn is_signed(&self) -> bool {
        !matches!(
            self,
            ScalarType::U8 | ScalarType::U16 | ScalarType::U32 | ScalarType::U64
        )
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarType {
    type Err = FireError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        ScalarType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == tag)
            .ok_or_else(|| FireError::unsupported_type(s))
    }
}

/// Element type usable by the kernels
///
/// `fires` compares exactly even when `self + threshold` leaves the type's
/// range, and `increment` saturates for integer types so a long spike train
/// pins at the type's bound instead of wrapping around.
pub trait Scalar: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag of this type
    const TYPE: ScalarType;
    /// Additive identity
    const ZERO: Self;
    /// Value written for a fired spike
    const ONE: Self;

    /// Convert a runtime scalar parameter (saturating, NaN maps to zero for integers)
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64`
    fn to_f64(self) -> f64;

    /// Whether `self + threshold < input` holds in exact arithmetic
    fn fires(self, threshold: Self, input: Self) -> bool;

    /// `self + 1`, saturating for integers
    fn increment(self) -> Self;

    /// Wrap an owned buffer in its dynamic variant
    fn into_data(data: Vec<Self>) -> TensorData;

    /// Borrow the buffer if `data` holds this type
    fn from_data(data: &TensorData) -> Option<&[Self]>;

    /// Mutably borrow the buffer if `data` holds this type
    fn from_data_mut(data: &mut TensorData) -> Option<&mut [Self]>;
}

macro_rules! impl_scalar_common {
    ($t:ty, $tag:ident) => {
        const TYPE: ScalarType = ScalarType::$tag;

        fn to_f64(self) -> f64 {
            self as f64
        }

        fn into_data(data: Vec<Self>) -> TensorData {
            TensorData::$tag(data)
        }

        fn from_data(data: &TensorData) -> Option<&[Self]> {
            match data {
                TensorData::$tag(v) => Some(v.as_slice()),
                _ => None,
            }
        }

        fn from_data_mut(data: &mut TensorData) -> Option<&mut [Self]> {
            match data {
                TensorData::$tag(v) => Some(v.as_mut_slice()),
                _ => None,
            }
        }
    };
}

macro_rules! impl_int_scalar {
    ($($t:ty => $tag:ident),* $(,)?) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            impl_scalar_common!($t, $tag);

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn fires(self, threshold: Self, input: Self) -> bool {
                // out of range below MIN fires for any input, above MAX never
                self.checked_add(threshold)
                    .map_or(threshold < Self::ZERO, |reference| reference < input)
            }

            fn increment(self) -> Self {
                self.saturating_add(1)
            }
        }
    )*};
}

macro_rules! impl_float_scalar {
    ($($t:ty => $tag:ident),* $(,)?) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            impl_scalar_common!($t, $tag);

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn fires(self, threshold: Self, input: Self) -> bool {
                self + threshold < input
            }

            fn increment(self) -> Self {
                self + 1.0
            }
        }
    )*};
}

impl_int_scalar!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
);

impl_float_scalar!(f32 => F32, f64 => F64);
