// crates/golomb-core/src/lib.rs
//
// Streaming Exponential-Golomb coding of integer data.
//
// The coder runs in a single pass with one code unit of buffering on either
// side, which keeps it usable in low-latency and memory-tight settings. No
// container format is defined here: the encoded stream is a raw sequence of
// code units and framing is the caller's responsibility.

pub mod error;
pub mod validate;

pub mod adaptive;
pub mod bits;
pub mod decoder;
pub mod encoder;
pub mod stream;
pub mod zigzag;

pub use crate::adaptive::{AdaptiveDecoder, AdaptiveEncoder, OrderFilter};
pub use crate::bits::{CodeUnit, CodeValue, SignedValue};
pub use crate::decoder::{decode_signed_to_vec, decode_to_vec, Decoder};
pub use crate::encoder::{encode_signed_to_vec, encode_to_vec, Encoder};
pub use crate::error::{GolombError, Result};
pub use crate::stream::{ByteSink, ByteSource, EmitCodeUnit, IterSource, NextCodeUnit};
