// crates/golomb-core/src/adaptive.rs
//
// Adaptive order control. After every symbol the order is pulled toward the
// bit-width of the magnitude just seen by an exponential smoothing filter:
//
//     k <- k - (k >> a) + (bit_width(m) >> a)
//
// Encoder and decoder run the same filter over the same magnitudes, so both
// sides derive the same per-symbol order sequence and the stream stays
// reversible without any side channel.

use crate::bits::{CodeUnit, CodeValue};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::stream::{EmitCodeUnit, NextCodeUnit};
use crate::validate;
use crate::zigzag;

/// Exponential smoothing filter over magnitude bit-widths.
///
/// With factor `a = 0` the order snaps to the last magnitude's bit-width;
/// larger factors track more smoothly. The order never leaves `0..WIDTH`.
#[derive(Clone, Copy, Debug)]
pub struct OrderFilter {
    order: u32,
    max_order: u32,
    factor: u32,
}

impl OrderFilter {
    pub fn new(k: u32, factor: u32, width: u32) -> Result<Self> {
        validate::order_in_range(k, width)?;
        validate::factor_in_range(factor, width)?;
        Ok(Self {
            order: k,
            max_order: width - 1,
            factor,
        })
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Feed the bit-width of the magnitude just processed.
    ///
    /// `k >> a <= k`, so the intermediate never goes negative. Magnitudes of
    /// full width would drive the order to `WIDTH`; the clamp keeps the
    /// `k < WIDTH` invariant.
    pub fn observe(&mut self, magnitude_width: u32) {
        let k = self.order;
        let next = k - (k >> self.factor) + (magnitude_width >> self.factor);
        self.order = next.min(self.max_order);
    }
}

/// [`Encoder`] wrapper that re-derives the order after every symbol.
pub struct AdaptiveEncoder<V, U, S> {
    inner: Encoder<V, U, S>,
    filter: OrderFilter,
}

impl<V, U, S> AdaptiveEncoder<V, U, S>
where
    V: CodeValue,
    U: CodeUnit,
    S: EmitCodeUnit<U>,
{
    pub fn new(sink: S, k: u32, factor: u32) -> Result<Self> {
        let filter = OrderFilter::new(k, factor, V::WIDTH)?;
        Ok(Self {
            inner: Encoder::new(sink, k)?,
            filter,
        })
    }

    pub fn order(&self) -> u32 {
        self.inner.order()
    }

    pub fn push(&mut self, value: V) -> Result<()> {
        self.inner.push(value)?;
        self.filter.observe(value.bit_width());
        self.inner.set_k(self.filter.order());
        Ok(())
    }

    /// The filter sees the zig-zag mapped magnitude, same as the decode side.
    pub fn push_signed(&mut self, value: V::Signed) -> Result<()> {
        self.push(zigzag::to_unsigned(value))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}

/// [`Decoder`] wrapper that re-derives the order after every symbol.
pub struct AdaptiveDecoder<V, U, S> {
    inner: Decoder<V, U, S>,
    filter: OrderFilter,
}

impl<V, U, S> AdaptiveDecoder<V, U, S>
where
    V: CodeValue,
    U: CodeUnit,
    S: NextCodeUnit<U>,
{
    pub fn new(source: S, k: u32, factor: u32) -> Result<Self> {
        let filter = OrderFilter::new(k, factor, V::WIDTH)?;
        Ok(Self {
            inner: Decoder::new(source, k)?,
            filter,
        })
    }

    pub fn order(&self) -> u32 {
        self.inner.order()
    }

    pub fn pull(&mut self) -> Result<Option<V>> {
        let value = self.inner.pull()?;
        if let Some(v) = value {
            self.filter.observe(v.bit_width());
            self.inner.set_k(self.filter.order());
        }
        Ok(value)
    }

    pub fn pull_signed(&mut self) -> Result<Option<V::Signed>> {
        Ok(self.pull()?.map(zigzag::to_signed))
    }

    pub fn has_data(&mut self) -> Result<bool> {
        self.inner.has_data()
    }

    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}
