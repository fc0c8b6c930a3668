//! Bounds-checked little-endian cursor over a borrowed datagram.

use crate::{DecodeError, DecodeResult};

/// Cursor-style reader for little-endian binary data.
///
/// Every read checks bounds first; running off the end yields
/// [`DecodeError::TruncatedBuffer`] instead of panicking.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        let truncated = DecodeError::TruncatedBuffer {
            needed: self.pos.saturating_add(len),
            actual: self.data.len(),
        };
        let end = self.pos.checked_add(len).ok_or(truncated.clone())?;
        let slice = self.data.get(self.pos..end).ok_or(truncated)?;
        self.pos = end;
        Ok(slice)
    }

    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.bytes(len).map(|_| ())
    }

    #[inline]
    pub fn array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N)?);
        Ok(out)
    }

    #[inline]
    pub fn u8(&mut self) -> DecodeResult<u8> {
        self.array::<1>().map(u8::from_le_bytes)
    }

    #[inline]
    pub fn i8(&mut self) -> DecodeResult<i8> {
        self.array::<1>().map(i8::from_le_bytes)
    }

    #[inline]
    pub fn u16_le(&mut self) -> DecodeResult<u16> {
        self.array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn i16_le(&mut self) -> DecodeResult<i16> {
        self.array().map(i16::from_le_bytes)
    }

    #[inline]
    pub fn u32_le(&mut self) -> DecodeResult<u32> {
        self.array().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn u64_le(&mut self) -> DecodeResult<u64> {
        self.array().map(u64::from_le_bytes)
    }

    /// IEEE754 single, bit pattern preserved (NaN and infinities included).
    #[inline]
    pub fn f32_le(&mut self) -> DecodeResult<f32> {
        self.array().map(f32::from_le_bytes)
    }

    #[inline]
    pub fn f64_le(&mut self) -> DecodeResult<f64> {
        self.array().map(f64::from_le_bytes)
    }

    pub fn u16_le_array<const N: usize>(&mut self) -> DecodeResult<[u16; N]> {
        let mut arr = [0u16; N];
        for item in arr.iter_mut() {
            *item = self.u16_le()?;
        }
        Ok(arr)
    }

    pub fn f32_le_array<const N: usize>(&mut self) -> DecodeResult<[f32; N]> {
        let mut arr = [0.0f32; N];
        for item in arr.iter_mut() {
            *item = self.f32_le()?;
        }
        Ok(arr)
    }

    /// Fixed-width, NUL-terminated UTF-8 string field.
    ///
    /// Consumes all `N` bytes; the text stops at the first NUL. Invalid UTF-8
    /// is replaced rather than rejected.
    pub fn fixed_str<const N: usize>(&mut self) -> DecodeResult<String> {
        let raw = self.bytes(N)?;
        let text = raw.split(|b| *b == 0).next().unwrap_or_default();
        Ok(String::from_utf8_lossy(text).into_owned())
    }

    /// Decode `N` consecutive fixed-size records.
    pub fn records<T, const N: usize>(
        &mut self,
        mut decode: impl FnMut(&mut Self) -> DecodeResult<T>,
    ) -> DecodeResult<[T; N]>
    where
        [T; N]: Default,
    {
        let mut out: [T; N] = Default::default();
        for slot in out.iter_mut() {
            *slot = decode(self)?;
        }
        Ok(out)
    }

    /// Like [`ByteReader::records`] for counts too large for array traits.
    pub fn records_vec<T>(
        &mut self,
        count: usize,
        mut decode: impl FnMut(&mut Self) -> DecodeResult<T>,
    ) -> DecodeResult<Vec<T>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(decode(self)?);
        }
        Ok(out)
    }
}
