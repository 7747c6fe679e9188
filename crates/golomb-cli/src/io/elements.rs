// crates/golomb-cli/src/io/elements.rs
//
// Fixed-size binary element I/O in native byte order. A short read that
// still delivered some bytes is a malformed input, not an end of stream;
// the original data cannot have ended mid-element.

use std::io::{Error, ErrorKind, Read, Result, Write};

pub trait Element: Copy {
    const SIZE: usize;

    /// Read one element, `Ok(None)` at a clean end of input.
    fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>>;

    fn write_to<W: Write>(self, writer: &mut W) -> Result<()>;
}

macro_rules! impl_element {
    ($($t:ty),* $(,)?) => {$(
        impl Element for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>> {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                let mut filled = 0;
                while filled < buf.len() {
                    match reader.read(&mut buf[filled..]) {
                        Ok(0) => break,
                        Ok(n) => filled += n,
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    }
                }
                if filled == 0 {
                    return Ok(None);
                }
                if filled < buf.len() {
                    return Err(Error::new(
                        ErrorKind::UnexpectedEof,
                        format!("input ends mid-element ({} of {} bytes)", filled, buf.len()),
                    ));
                }
                Ok(Some(<$t>::from_ne_bytes(buf)))
            }

            fn write_to<W: Write>(self, writer: &mut W) -> Result<()> {
                writer.write_all(&self.to_ne_bytes())
            }
        }
    )*};
}

impl_element!(u8, i8, u16, i16, u32, i32, u64, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_native_order_elements() {
        let raw = 0x1234_5678u32.to_ne_bytes();
        let mut cursor = &raw[..];
        assert_eq!(u32::read_from(&mut cursor).unwrap(), Some(0x1234_5678));
        assert_eq!(u32::read_from(&mut cursor).unwrap(), None);
    }

    #[test]
    fn rejects_partial_trailing_element() {
        let raw = [0u8; 6];
        let mut cursor = &raw[..];
        assert!(u32::read_from(&mut cursor).unwrap().is_some());
        let err = u32::read_from(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn roundtrips_signed_elements() {
        let mut out = Vec::new();
        (-12345i16).write_to(&mut out).unwrap();
        let mut cursor = &out[..];
        assert_eq!(i16::read_from(&mut cursor).unwrap(), Some(-12345));
    }
}
