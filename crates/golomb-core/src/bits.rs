// crates/golomb-core/src/bits.rs
//
// Width-parameterized integer traits for the coder. The hot loops are plain
// shifts and ORs, so the traits stay thin: num-traits supplies the operator
// surface, the macro supplies the width constants and the truncating u64
// conversions the packing code needs.

use num_traits::ops::wrapping::{WrappingAdd, WrappingSub};
use num_traits::{PrimInt, Signed, Unsigned};

/// Fixed-width unsigned integer that packages a slice of the bitstream.
///
/// Units are filled MSB-first and emitted in stream order. Multi-byte units
/// keep the native byte order when they cross an I/O boundary.
pub trait CodeUnit: PrimInt + Unsigned {
    const BITS: u32;

    /// Zero-extend into a shift register.
    fn to_bits(self) -> u64;

    /// Truncate the low `BITS` bits of a shift register.
    fn from_bits(bits: u64) -> Self;
}

/// Unsigned integer type accepted as a symbol value, width `WIDTH` bits.
pub trait CodeValue: PrimInt + Unsigned + WrappingAdd + WrappingSub {
    const WIDTH: u32;

    /// The same-width two's-complement partner type.
    type Signed: SignedValue<Unsigned = Self>;

    fn to_bits(self) -> u64;

    fn from_bits(bits: u64) -> Self;

    /// Bit-cast, preserving the bit pattern.
    fn cast_signed(self) -> Self::Signed;

    /// Position of the highest set bit plus one; `bit_width(0) == 0`.
    #[inline]
    fn bit_width(self) -> u32 {
        Self::WIDTH - self.leading_zeros()
    }
}

/// Signed partner of a [`CodeValue`], used only at the zig-zag boundary.
pub trait SignedValue: PrimInt + Signed {
    type Unsigned: CodeValue<Signed = Self>;

    /// Bit-cast, preserving the bit pattern.
    fn cast_unsigned(self) -> Self::Unsigned;
}

macro_rules! impl_code_int {
    ($($unsigned:ty => $signed:ty),* $(,)?) => {$(
        impl CodeUnit for $unsigned {
            const BITS: u32 = <$unsigned>::BITS;

            #[inline]
            fn to_bits(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $unsigned
            }
        }

        impl CodeValue for $unsigned {
            const WIDTH: u32 = <$unsigned>::BITS;

            type Signed = $signed;

            #[inline]
            fn to_bits(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $unsigned
            }

            #[inline]
            fn cast_signed(self) -> $signed {
                self as $signed
            }
        }

        impl SignedValue for $signed {
            type Unsigned = $unsigned;

            #[inline]
            fn cast_unsigned(self) -> $unsigned {
                self as $unsigned
            }
        }
    )*};
}

impl_code_int! {
    u8 => i8,
    u16 => i16,
    u32 => i32,
    u64 => i64,
}
