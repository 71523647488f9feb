//! Records shared between the header and tag bodies.

use zerocopy::FromBytes;

use super::cursor::{Cursor, Underrun};

/// An axis-aligned rectangle in twips (1/20 pixel).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Rectangle {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rectangle {
    /// Decode a bit-packed rectangle, leaving the cursor on the following byte
    /// boundary.
    ///
    /// A leading five-bit count gives the width of each of the four signed
    /// coordinates.
    pub fn read(r: &mut Cursor<'_>) -> Result<Self, Underrun> {
        let mut bits = r.bits();
        let n = bits.read_ubits(5)? as u8;

        Ok(Self {
            x_min: bits.read_sbits(n)?,
            x_max: bits.read_sbits(n)?,
            y_min: bits.read_sbits(n)?,
            y_max: bits.read_sbits(n)?,
        })
    }
}

/// An opaque color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, FromBytes, Hash, PartialEq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn read(r: &mut Cursor<'_>) -> Result<Self, Underrun> {
        Ok(zerocopy::transmute!(r.take::<3>()?))
    }
}

/// A color with straight (non-premultiplied) alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, FromBytes, Hash, PartialEq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub fn read(r: &mut Cursor<'_>) -> Result<Self, Underrun> {
        Ok(zerocopy::transmute!(r.take::<4>()?))
    }
}

impl From<Rgb> for Rgba {
    fn from(Rgb { red, green, blue }: Rgb) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: u8::MAX,
        }
    }
}

/// A two-dimensional affine transform.
///
/// Translation is in twips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotate_skew_0: f32,
    pub rotate_skew_1: f32,
    pub translate_x: i32,
    pub translate_y: i32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            rotate_skew_0: 0.0,
            rotate_skew_1: 0.0,
            translate_x: 0,
            translate_y: 0,
        }
    }
}

impl Matrix {
    /// Decode a bit-packed matrix, leaving the cursor on the following byte
    /// boundary.
    pub fn read(r: &mut Cursor<'_>) -> Result<Self, Underrun> {
        let mut bits = r.bits();
        let mut matrix = Self::default();

        if bits.read_bit()? {
            let n = bits.read_ubits(5)? as u8;
            matrix.scale_x = bits.read_fbits(n)?;
            matrix.scale_y = bits.read_fbits(n)?;
        }

        if bits.read_bit()? {
            let n = bits.read_ubits(5)? as u8;
            matrix.rotate_skew_0 = bits.read_fbits(n)?;
            matrix.rotate_skew_1 = bits.read_fbits(n)?;
        }

        let n = bits.read_ubits(5)? as u8;
        matrix.translate_x = bits.read_sbits(n)?;
        matrix.translate_y = bits.read_sbits(n)?;

        Ok(matrix)
    }
}
