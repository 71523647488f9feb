#![allow(dead_code)]

//! Builders for hand-assembled movies.

/// Tag codes used across tests.
pub const END: u16 = 0;
pub const SHOW_FRAME: u16 = 1;
pub const DEFINE_SHAPE: u16 = 2;
pub const SET_BACKGROUND_COLOR: u16 = 9;
pub const DEFINE_SHAPE_2: u16 = 22;
pub const DEFINE_SHAPE_3: u16 = 32;
pub const FILE_ATTRIBUTES: u16 = 69;
pub const DEFINE_SHAPE_4: u16 = 83;
pub const DEFINE_SCENE_AND_FRAME_LABEL_DATA: u16 = 86;
/// DefineBitsJPEG2, which has no decoder.
pub const UNKNOWN: u16 = 21;

/// A most-significant-bit-first bit writer.
#[derive(Default)]
pub struct Bits {
    bytes: Vec<u8>,
    used: u8,
}

impl Bits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit(&mut self, value: bool) -> &mut Self {
        if self.used == 0 {
            self.bytes.push(0);
        }

        if value {
            *self.bytes.last_mut().unwrap() |= 0x80 >> self.used;
        }

        self.used = (self.used + 1) % 8;
        self
    }

    pub fn ubits(&mut self, value: u32, n: u8) -> &mut Self {
        for i in (0..n).rev() {
            self.bit((value >> i) & 1 != 0);
        }
        self
    }

    pub fn sbits(&mut self, value: i32, n: u8) -> &mut Self {
        self.ubits(value as u32, n)
    }

    /// Pad to a byte boundary and append whole bytes.
    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.used = 0;
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn finish(&mut self) -> Vec<u8> {
        self.used = 0;
        std::mem::take(&mut self.bytes)
    }
}

/// The number of bits needed to hold each value as a signed field.
pub fn signed_width(values: &[i32]) -> u8 {
    values
        .iter()
        .map(|&v| {
            let unused = if v < 0 { v.leading_ones() } else { v.leading_zeros() };
            (33 - unused) as u8
        })
        .max()
        .unwrap_or(1)
}

pub fn rect(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Vec<u8> {
    let n = signed_width(&[x_min, x_max, y_min, y_max]);

    Bits::new()
        .ubits(n as u32, 5)
        .sbits(x_min, n)
        .sbits(x_max, n)
        .sbits(y_min, n)
        .sbits(y_max, n)
        .finish()
}

/// A tag with a short length where it fits, and a long length otherwise.
pub fn tag(code: u16, body: &[u8]) -> Vec<u8> {
    if body.len() < 0x3F {
        let mut out = ((code << 6) | body.len() as u16).to_le_bytes().to_vec();
        out.extend_from_slice(body);
        out
    } else {
        long_tag(code, body)
    }
}

/// A tag that always uses the four-byte length escape.
pub fn long_tag(code: u16, body: &[u8]) -> Vec<u8> {
    let mut out = ((code << 6) | 0x3F).to_le_bytes().to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// An uncompressed movie header for a 550x400 pixel stage.
pub fn header(frame_rate: u16, frame_count: u16) -> Vec<u8> {
    let mut out = b"FWS".to_vec();
    out.push(10);
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&rect(0, 11000, 0, 8000));
    out.extend_from_slice(&frame_rate.to_le_bytes());
    out.extend_from_slice(&frame_count.to_le_bytes());
    out
}

/// A movie of the given tags with a correct declared length.
pub fn movie(tags: &[Vec<u8>]) -> Vec<u8> {
    let mut out = header(24 << 8, 1);
    for tag in tags {
        out.extend_from_slice(tag);
    }

    let length = out.len() as u32;
    out[4..8].copy_from_slice(&length.to_le_bytes());
    out
}

/// A FileAttributes tag declaring ActionScript 3 and network access.
pub fn file_attributes() -> Vec<u8> {
    tag(FILE_ATTRIBUTES, &0x09u32.to_le_bytes())
}

pub fn show_frame() -> Vec<u8> {
    tag(SHOW_FRAME, &[])
}

pub fn end() -> Vec<u8> {
    tag(END, &[])
}
