//! Sequential, bounds-checked reading over a byte slice.

use thiserror::Error;

/// Too few bytes remained to satisfy a read.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("Requested {requested} bytes with only {remaining} remaining.")]
pub struct Underrun {
    pub requested: usize,
    pub remaining: usize,
}

/// A forward-only reader over a borrowed byte slice.
///
/// Multi-byte integers are little-endian. A failed read leaves the cursor
/// where it was.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `n` bytes, advancing past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Underrun> {
        let remaining = self.remaining();

        if n > remaining {
            return Err(Underrun {
                requested: n,
                remaining,
            });
        }

        let s = self.position;
        self.position += n;

        Ok(&self.data[s..self.position])
    }

    /// Take an exact number of bytes as an array, advancing past them.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], Underrun> {
        let mut buf = [0; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    /// Carve out a cursor over exactly the next `n` bytes.
    ///
    /// The returned cursor starts at offset zero, and this cursor moves past
    /// all `n` bytes no matter how many of them are later read.
    pub fn sub_cursor(&mut self, n: usize) -> Result<Cursor<'a>, Underrun> {
        self.read_bytes(n).map(Cursor::new)
    }

    pub fn read_u8(&mut self) -> Result<u8, Underrun> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, Underrun> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, Underrun> {
        Ok(i16::from_le_bytes(self.take()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, Underrun> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    /// Read a signed 8.8 fixed-point value.
    pub fn read_fixed8(&mut self) -> Result<f32, Underrun> {
        Ok(self.read_i16()? as f32 / 256.0)
    }

    /// Read a variable-length unsigned integer of one to five bytes.
    ///
    /// Each byte carries seven bits, least-significant group first, with the
    /// high bit set on every byte but the last.
    pub fn read_encoded_u32(&mut self) -> Result<u32, Underrun> {
        let s = self.position;
        let mut value = 0u32;

        for i in 0..5 {
            let b = match self.read_u8() {
                Ok(b) => b,
                Err(err) => {
                    self.position = s;
                    return Err(err);
                }
            };

            value |= ((b & 0x7F) as u32) << (7 * i);

            if b & 0x80 == 0 {
                break;
            }
        }

        Ok(value)
    }

    /// Read bytes up to a NUL terminator, advancing past the terminator.
    ///
    /// The terminator is not included in the result.
    pub fn read_cstr(&mut self) -> Result<&'a [u8], Underrun> {
        let rest = &self.data[self.position..];

        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(Underrun {
                requested: rest.len() + 1,
                remaining: rest.len(),
            });
        };

        self.position += len + 1;

        Ok(&rest[..len])
    }

    /// Begin reading bit-packed fields at the current byte.
    pub fn bits(&mut self) -> BitReader<'_, 'a> {
        BitReader {
            cursor: self,
            byte: 0,
            available: 0,
        }
    }
}

/// A most-significant-bit-first view over a [`Cursor`].
///
/// Bytes are pulled from the cursor as bits are needed. Any unread bits of a
/// partially consumed byte are discarded when the reader is dropped or
/// realigned, leaving the cursor at the next byte boundary.
#[derive(Debug)]
pub struct BitReader<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    byte: u8,
    available: u8,
}

impl<'a> BitReader<'_, 'a> {
    pub fn read_bit(&mut self) -> Result<bool, Underrun> {
        if self.available == 0 {
            self.byte = self.cursor.read_u8()?;
            self.available = 8;
        }

        self.available -= 1;

        Ok((self.byte >> self.available) & 1 != 0)
    }

    /// Read an unsigned field of `n` bits, up to 32.
    pub fn read_ubits(&mut self, n: u8) -> Result<u32, Underrun> {
        let mut value = 0u32;

        for _ in 0..n {
            value = (value << 1) | self.read_bit()? as u32;
        }

        Ok(value)
    }

    /// Read a sign-extended field of `n` bits, up to 32.
    pub fn read_sbits(&mut self, n: u8) -> Result<i32, Underrun> {
        if n == 0 {
            return Ok(0);
        }

        let shift = 32 - n as u32;

        Ok(((self.read_ubits(n)? << shift) as i32) >> shift)
    }

    /// Read a signed 16.16 fixed-point field of `n` bits.
    pub fn read_fbits(&mut self, n: u8) -> Result<f32, Underrun> {
        Ok(self.read_sbits(n)? as f32 / 65536.0)
    }

    /// Discard any partially read byte and return to byte-wise reading.
    ///
    /// Bit reading resumes at the cursor's position afterward.
    pub fn aligned(&mut self) -> &mut Cursor<'a> {
        self.available = 0;
        &mut *self.cursor
    }
}
