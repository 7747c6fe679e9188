// crates/golomb-core/src/stream.rs
//
// Sink/source seams for code units. The coder only ever sees these two
// traits; whether units land in a Vec, a file, or a socket is the caller's
// business. Errors from the underlying transport pass through untouched.

use std::io::{ErrorKind, Read, Write};

use crate::bits::CodeUnit;
use crate::error::Result;

/// Push-style consumer of code units, in stream order.
pub trait EmitCodeUnit<U: CodeUnit> {
    fn emit(&mut self, unit: U) -> Result<()>;
}

/// Pull-style producer of code units, in stream order.
///
/// `Ok(None)` signals a clean end of input. Transport errors surface as-is.
pub trait NextCodeUnit<U: CodeUnit> {
    fn next_unit(&mut self) -> Result<Option<U>>;
}

impl<U: CodeUnit> EmitCodeUnit<U> for Vec<U> {
    #[inline]
    fn emit(&mut self, unit: U) -> Result<()> {
        self.push(unit);
        Ok(())
    }
}

impl<U: CodeUnit, T: EmitCodeUnit<U>> EmitCodeUnit<U> for &mut T {
    #[inline]
    fn emit(&mut self, unit: U) -> Result<()> {
        (**self).emit(unit)
    }
}

impl<U: CodeUnit, T: NextCodeUnit<U>> NextCodeUnit<U> for &mut T {
    #[inline]
    fn next_unit(&mut self) -> Result<Option<U>> {
        (**self).next_unit()
    }
}

/// Adapter turning any unit iterator into a source; iteration order is
/// stream order.
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<U: CodeUnit, I: Iterator<Item = U>> NextCodeUnit<U> for IterSource<I> {
    #[inline]
    fn next_unit(&mut self) -> Result<Option<U>> {
        Ok(self.iter.next())
    }
}

/// Byte-unit sink over any [`Write`], counting emitted units.
pub struct ByteSink<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> ByteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Units emitted so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> EmitCodeUnit<u8> for ByteSink<W> {
    #[inline]
    fn emit(&mut self, unit: u8) -> Result<()> {
        self.inner.write_all(&[unit])?;
        self.written += 1;
        Ok(())
    }
}

/// Byte-unit source over any [`Read`], counting fetched units.
pub struct ByteSource<R: Read> {
    inner: R,
    fetched: u64,
}

impl<R: Read> ByteSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, fetched: 0 }
    }

    /// Units fetched so far.
    pub fn fetched(&self) -> u64 {
        self.fetched
    }
}

impl<R: Read> NextCodeUnit<u8> for ByteSource<R> {
    fn next_unit(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            return match self.inner.read(&mut buf) {
                Ok(0) => Ok(None),
                Ok(_) => {
                    self.fetched += 1;
                    Ok(Some(buf[0]))
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => Err(e.into()),
            };
        }
    }
}
