//! Runtime scalar-type dispatch
//!
//! A [`TensorData`](crate::tensor::TensorData) carries its element type as an
//! enum variant. These macros resolve the variant once per call and bind the
//! buffer as a typed slice, so a generic kernel body is instantiated for every
//! supported type. Nesting two dispatches covers the input/output pairs of
//! `rank_fire` and `rate_fire`.
//!
//! The set of variants is closed, so there is no fallthrough arm: an
//! unrecognized type can only appear while parsing a tag, where it is
//! reported as [`FireError::UnsupportedType`](crate::FireError::UnsupportedType).

/// Bind the buffer of a `&TensorData` as `&[T]` and evaluate `$body`
macro_rules! dispatch_ref {
    ($data:expr, $bind:ident => $body:expr) => {
        match $data {
            $crate::tensor::TensorData::I8(v) => {
                let $bind: &[i8] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::I16(v) => {
                let $bind: &[i16] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::I32(v) => {
                let $bind: &[i32] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::I64(v) => {
                let $bind: &[i64] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::U8(v) => {
                let $bind: &[u8] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::U16(v) => {
                let $bind: &[u16] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::U32(v) => {
                let $bind: &[u32] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::U64(v) => {
                let $bind: &[u64] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::F32(v) => {
                let $bind: &[f32] = v.as_slice();
                $body
            }
            $crate::tensor::TensorData::F64(v) => {
                let $bind: &[f64] = v.as_slice();
                $body
            }
        }
    };
}

/// Bind the buffer of a `&mut TensorData` as `&mut [T]` and evaluate `$body`
macro_rules! dispatch_mut {
    ($data:expr, $bind:ident => $body:expr) => {
        match $data {
            $crate::tensor::TensorData::I8(v) => {
                let $bind: &mut [i8] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::I16(v) => {
                let $bind: &mut [i16] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::I32(v) => {
                let $bind: &mut [i32] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::I64(v) => {
                let $bind: &mut [i64] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::U8(v) => {
                let $bind: &mut [u8] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::U16(v) => {
                let $bind: &mut [u16] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::U32(v) => {
                let $bind: &mut [u32] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::U64(v) => {
                let $bind: &mut [u64] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::F32(v) => {
                let $bind: &mut [f32] = v.as_mut_slice();
                $body
            }
            $crate::tensor::TensorData::F64(v) => {
                let $bind: &mut [f64] = v.as_mut_slice();
                $body
            }
        }
    };
}

pub(crate) use dispatch_mut;
pub(crate) use dispatch_ref;
