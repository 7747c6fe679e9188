// crates/golomb-core/src/encoder.rs

use std::marker::PhantomData;

use crate::adaptive::AdaptiveEncoder;
use crate::bits::{CodeUnit, CodeValue, SignedValue};
use crate::error::Result;
use crate::stream::EmitCodeUnit;
use crate::validate;
use crate::zigzag;

/// Streaming Exponential-Golomb encoder.
///
/// Symbols of type `V` go in, code units of type `U` come out in stream
/// order. State is one partially-filled unit plus the current order; nothing
/// is buffered beyond that, so a push never emits more than the units it
/// completes.
///
/// A value `u` with order `k` becomes `v = u + 2^k`, written as
/// `bit_width(v) - k - 1` zeros followed by the bits of `v`. When `u + 2^k`
/// does not fit the value width `W`, the code is `W - k` zeros, a `1`
/// separator, and the `W` low bits of the wrapped sum instead.
///
/// The encoder must be flushed at end of input to emit the final partial
/// unit; padding is zero bits on the LSB side.
pub struct Encoder<V, U, S> {
    sink: S,
    buffer: U,
    bits_used: u32,
    k: u32,
    _values: PhantomData<V>,
}

impl<V, U, S> Encoder<V, U, S>
where
    V: CodeValue,
    U: CodeUnit,
    S: EmitCodeUnit<U>,
{
    pub fn new(sink: S, k: u32) -> Result<Self> {
        validate::order_in_range(k, V::WIDTH)?;
        Ok(Self {
            sink,
            buffer: U::zero(),
            bits_used: 0,
            k,
            _values: PhantomData,
        })
    }

    /// Order used for subsequent symbols.
    pub fn order(&self) -> u32 {
        self.k
    }

    /// Change the order for subsequent symbols. The partial buffer is not
    /// touched.
    ///
    /// # Panics
    ///
    /// Panics when `k >= V::WIDTH`.
    pub fn set_k(&mut self, k: u32) {
        assert!(k < V::WIDTH, "order must be < value width, got k={}", k);
        self.k = k;
    }

    /// Encode one symbol with the current order.
    pub fn push(&mut self, value: V) -> Result<()> {
        let base = V::one() << (self.k as usize);
        let overflow = value > V::max_value() - base;
        let coded = value.wrapping_add(&base);

        let (width, zeros) = if overflow {
            (V::WIDTH, V::WIDTH - self.k)
        } else {
            let width = coded.bit_width();
            (width, width - self.k - 1)
        };

        self.write_zeros(zeros)?;
        if overflow {
            // The prefix normally ends with the top bit of `coded`; the
            // overflow form needs its separator written explicitly.
            self.write_bits(1, 1)?;
        }
        self.write_bits(coded.to_bits(), width)
    }

    /// Encode one signed symbol through the zig-zag mapping.
    pub fn push_signed(&mut self, value: V::Signed) -> Result<()> {
        self.push(zigzag::to_unsigned(value))
    }

    /// Emit the partial buffer, zero-padded on the LSB side. Idempotent.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_used > 0 {
            let unit = self.buffer;
            self.sink.emit(unit)?;
            self.buffer = U::zero();
            self.bits_used = 0;
        }
        Ok(())
    }

    /// Discard the partial buffer so the encoder can start a fresh stream.
    pub fn reset(&mut self) {
        self.buffer = U::zero();
        self.bits_used = 0;
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    fn write_zeros(&mut self, zeros: u32) -> Result<()> {
        self.bits_used += zeros;
        while self.bits_used >= U::BITS {
            let unit = self.buffer;
            self.sink.emit(unit)?;
            self.buffer = U::zero();
            self.bits_used -= U::BITS;
        }
        Ok(())
    }

    /// Write the low `remaining` bits of `data`, MSB-first. The buffer is
    /// filled from its MSB side down; completed units go to the sink, the
    /// final fragment stays buffered.
    fn write_bits(&mut self, data: u64, mut remaining: u32) -> Result<()> {
        debug_assert!(remaining <= 64);
        while remaining > 0 {
            let chunk = data & (u64::MAX >> (64 - remaining));
            let free = U::BITS - self.bits_used;

            if remaining >= free {
                let shift = remaining - free;
                let unit = self.buffer | U::from_bits(chunk >> shift);
                self.sink.emit(unit)?;
                self.buffer = U::zero();
                self.bits_used = 0;
                remaining = shift;
            } else {
                let shift = free - remaining;
                self.buffer = self.buffer | (U::from_bits(chunk) << (shift as usize));
                self.bits_used += remaining;
                remaining = 0;
            }
        }
        Ok(())
    }
}

/// One-shot encode of a value slice into a fresh unit vector.
pub fn encode_to_vec<V, U>(values: &[V], k: u32, adaptive: Option<u32>) -> Result<Vec<U>>
where
    V: CodeValue,
    U: CodeUnit,
{
    let mut units = Vec::new();
    match adaptive {
        Some(factor) => {
            let mut enc = AdaptiveEncoder::<V, U, _>::new(&mut units, k, factor)?;
            for &value in values {
                enc.push(value)?;
            }
            enc.flush()?;
        }
        None => {
            let mut enc = Encoder::<V, U, _>::new(&mut units, k)?;
            for &value in values {
                enc.push(value)?;
            }
            enc.flush()?;
        }
    }
    Ok(units)
}

/// One-shot encode of signed values through the zig-zag mapping.
pub fn encode_signed_to_vec<T, U>(values: &[T], k: u32, adaptive: Option<u32>) -> Result<Vec<U>>
where
    T: SignedValue,
    U: CodeUnit,
{
    let mut units = Vec::new();
    match adaptive {
        Some(factor) => {
            let mut enc = AdaptiveEncoder::<T::Unsigned, U, _>::new(&mut units, k, factor)?;
            for &value in values {
                enc.push_signed(value)?;
            }
            enc.flush()?;
        }
        None => {
            let mut enc = Encoder::<T::Unsigned, U, _>::new(&mut units, k)?;
            for &value in values {
                enc.push_signed(value)?;
            }
            enc.flush()?;
        }
    }
    Ok(units)
}
