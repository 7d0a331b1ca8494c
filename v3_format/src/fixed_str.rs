//! Fixed-width, space-padded byte strings (the `An` fields of the v3 layouts).

use std::fmt::{Debug, Formatter};

use binrw::io::{Read, Seek, Write};
use binrw::{BinRead, BinResult, BinWrite, Endian};

use crate::text;

/// A byte string of exactly `N` bytes, already in the v3 single-byte
/// encoding, padded with spaces on the right.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedStr<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedStr<N> {
    /// Converts UTF-8 text, truncating when overlong.
    pub fn from_text(value: &str) -> Self {
        let mut buf = [b' '; N];
        for (slot, byte) in buf.iter_mut().zip(text::to_v3(value)) {
            *slot = byte;
        }
        Self(buf)
    }

    pub fn from_raw(value: [u8; N]) -> Self {
        Self(value)
    }

    /// The text with trailing padding removed, expanded back to UTF-8.
    pub fn to_text(&self) -> String {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != b' ')
            .map_or(0, |pos| pos + 1);
        text::from_v3(&self.0[..end])
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self([b' '; N])
    }
}

impl<const N: usize> Debug for FixedStr<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FixedStr({:?})", self.to_text())
    }
}

impl<const N: usize> BinRead for FixedStr<N> {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(reader: &mut R, _: Endian, _: ()) -> BinResult<Self> {
        let mut buf = [0u8; N];
        reader.read_exact(&mut buf)?;
        Ok(Self(buf))
    }
}

impl<const N: usize> BinWrite for FixedStr<N> {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(&self, writer: &mut W, _: Endian, _: ()) -> BinResult<()> {
        writer.write_all(&self.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pads_and_truncates() {
        let s = FixedStr::<5>::from_text("ab");
        assert_eq!(s.as_bytes(), b"ab   ");
        assert_eq!(s.to_text(), "ab");

        let s = FixedStr::<3>::from_text("longer");
        assert_eq!(s.as_bytes(), b"lon");
    }

    #[test]
    fn keeps_interior_spaces() {
        let s = FixedStr::<10>::from_text("a b");
        assert_eq!(s.to_text(), "a b");
    }
}
