// crates/golomb-core/src/decoder.rs

use std::marker::PhantomData;

use crate::adaptive::AdaptiveDecoder;
use crate::bits::{CodeUnit, CodeValue, SignedValue};
use crate::error::{GolombError, Result};
use crate::stream::{IterSource, NextCodeUnit};
use crate::validate;
use crate::zigzag;

/// Per-symbol scanner state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scan {
    /// Counting the zero prefix; `digits` grows with every zero seen.
    Zeros,
    /// Assembling the payload; the separator `1` is its most significant bit.
    Payload,
}

/// Streaming Exponential-Golomb decoder, the inverse of
/// [`Encoder`](crate::Encoder).
///
/// A symbol is read as `k + 1 + zeros` payload bits (the separator `1`
/// included), assembled modulo `2^W`, then `2^k` is subtracted with
/// wraparound. That one rule recovers the value for regular and overflow
/// code-words alike.
///
/// `pull` returns `Ok(None)` on a clean end of input; trailing zero bits
/// left by flush padding are ignored. End of input while a payload is
/// incomplete is a [`TruncatedStream`](GolombError::TruncatedStream) error,
/// and a zero prefix too long for the value width is
/// [`ZeroOverflow`](GolombError::ZeroOverflow).
pub struct Decoder<V, U, S> {
    source: S,
    input_buffer: U,
    /// Bits of `input_buffer` already consumed, MSB-side first. Equal to
    /// `U::BITS` when the buffer is empty. Consumed high bits are kept
    /// zeroed so a leading-zeros count stays valid mid-unit.
    consumed: u32,
    acc: u64,
    /// Payload bits still to read; `k + 1` at a symbol boundary.
    digits: u32,
    state: Scan,
    k: u32,
    _values: PhantomData<V>,
}

impl<V, U, S> Decoder<V, U, S>
where
    V: CodeValue,
    U: CodeUnit,
    S: NextCodeUnit<U>,
{
    pub fn new(source: S, k: u32) -> Result<Self> {
        validate::order_in_range(k, V::WIDTH)?;
        Ok(Self {
            source,
            input_buffer: U::zero(),
            consumed: U::BITS,
            acc: 0,
            digits: k + 1,
            state: Scan::Zeros,
            k,
            _values: PhantomData,
        })
    }

    /// Order used for subsequent symbols.
    pub fn order(&self) -> u32 {
        self.k
    }

    /// Change the order for subsequent symbols. Only meaningful at a symbol
    /// boundary, which is where `pull` always leaves the decoder.
    ///
    /// # Panics
    ///
    /// Panics when `k >= V::WIDTH`.
    pub fn set_k(&mut self, k: u32) {
        assert!(k < V::WIDTH, "order must be < value width, got k={}", k);
        debug_assert!(self.state == Scan::Zeros && self.acc == 0);
        self.k = k;
        self.digits = k + 1;
    }

    /// Decode the next symbol, or `Ok(None)` when the source is exhausted
    /// cleanly.
    pub fn pull(&mut self) -> Result<Option<V>> {
        loop {
            if self.consumed == U::BITS {
                match self.source.next_unit()? {
                    Some(unit) => {
                        self.input_buffer = unit;
                        self.consumed = 0;
                    }
                    None => {
                        return match self.state {
                            Scan::Zeros => Ok(None),
                            Scan::Payload => Err(GolombError::TruncatedStream),
                        };
                    }
                }
            }

            match self.state {
                Scan::Zeros => {
                    let n = self.input_buffer.leading_zeros();
                    self.digits = self.digits.saturating_add(n - self.consumed);
                    self.consumed = n;

                    if self.input_buffer != U::zero() {
                        // A separator after more than W - k zeros starts a
                        // symbol no width-W value can carry. Zeros that run
                        // straight into end of input are flush padding and
                        // never reach this check.
                        if self.digits > V::WIDTH + 1 {
                            return Err(GolombError::ZeroOverflow {
                                zeros: self.digits - self.k - 1,
                            });
                        }
                        self.state = Scan::Payload;
                    }
                }
                Scan::Payload => {
                    let remaining = U::BITS - self.consumed;

                    if self.digits >= remaining {
                        let shift = self.digits - remaining;
                        // Bits shifted past the register vanish; the symbol
                        // is assembled modulo 2^W either way.
                        if shift < 64 {
                            self.acc |= self.input_buffer.to_bits() << shift;
                        }
                        self.consumed = U::BITS;
                        self.digits -= remaining;
                    } else {
                        let shift = remaining - self.digits;
                        self.acc |= self.input_buffer.to_bits() >> shift;
                        self.consumed += self.digits;
                        self.input_buffer = self.input_buffer
                            & (U::max_value() >> (self.consumed as usize));
                        self.digits = 0;
                    }

                    if self.digits == 0 {
                        let base = 1u64 << self.k;
                        let value = V::from_bits(self.acc.wrapping_sub(base));
                        self.acc = 0;
                        self.digits = self.k + 1;
                        self.state = Scan::Zeros;
                        return Ok(Some(value));
                    }
                }
            }
        }
    }

    /// Decode the next symbol and apply the inverse zig-zag mapping.
    pub fn pull_signed(&mut self) -> Result<Option<V::Signed>> {
        Ok(self.pull()?.map(zigzag::to_signed))
    }

    /// True when buffered bits remain or the source can yield another unit.
    /// May fetch one unit ahead.
    pub fn has_data(&mut self) -> Result<bool> {
        if self.consumed < U::BITS {
            return Ok(true);
        }
        match self.source.next_unit()? {
            Some(unit) => {
                self.input_buffer = unit;
                self.consumed = 0;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop buffered input and return to a symbol boundary.
    pub fn reset(&mut self) {
        self.input_buffer = U::zero();
        self.consumed = U::BITS;
        self.acc = 0;
        self.digits = self.k + 1;
        self.state = Scan::Zeros;
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

/// One-shot decode of a unit slice into a fresh value vector.
pub fn decode_to_vec<V, U>(units: &[U], k: u32, adaptive: Option<u32>) -> Result<Vec<V>>
where
    V: CodeValue,
    U: CodeUnit,
{
    let mut values = Vec::new();
    match adaptive {
        Some(factor) => {
            let mut dec =
                AdaptiveDecoder::<V, U, _>::new(IterSource::new(units.iter().copied()), k, factor)?;
            while let Some(value) = dec.pull()? {
                values.push(value);
            }
        }
        None => {
            let mut dec = Decoder::<V, U, _>::new(IterSource::new(units.iter().copied()), k)?;
            while let Some(value) = dec.pull()? {
                values.push(value);
            }
        }
    }
    Ok(values)
}

/// One-shot decode into signed values through the inverse zig-zag mapping.
pub fn decode_signed_to_vec<T, U>(units: &[U], k: u32, adaptive: Option<u32>) -> Result<Vec<T>>
where
    T: SignedValue,
    U: CodeUnit,
{
    let mut values = Vec::new();
    match adaptive {
        Some(factor) => {
            let mut dec =
                AdaptiveDecoder::<T::Unsigned, U, _>::new(IterSource::new(units.iter().copied()), k, factor)?;
            while let Some(value) = dec.pull_signed()? {
                values.push(value);
            }
        }
        None => {
            let mut dec = Decoder::<T::Unsigned, U, _>::new(IterSource::new(units.iter().copied()), k)?;
            while let Some(value) = dec.pull_signed()? {
                values.push(value);
            }
        }
    }
    Ok(values)
}
