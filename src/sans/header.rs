//! States processing the movie header.

use thiserror::Error;
use tracing::debug;
use zerocopy::{FromBytes, little_endian::U32};

use super::{
    cursor::{Cursor, Underrun},
    record::Rectangle,
    tag::Scanning,
};

/// The compression declared by a movie's signature.
///
/// Everything after the first eight bytes of a compressed movie is
/// compressed. Decompression happens before decoding; see [`crate::avec`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Compression {
    /// `FWS`
    Uncompressed,
    /// `CWS`
    Zlib,
    /// `ZWS`
    Lzma,
}

impl Compression {
    /// Identify the compression declared by a signature, if recognized.
    pub fn from_signature(signature: [u8; 3]) -> Option<Self> {
        match &signature {
            b"FWS" => Some(Self::Uncompressed),
            b"CWS" => Some(Self::Zlib),
            b"ZWS" => Some(Self::Lzma),
            _ => None,
        }
    }

    pub fn signature(self) -> [u8; 3] {
        match self {
            Self::Uncompressed => *b"FWS",
            Self::Zlib => *b"CWS",
            Self::Lzma => *b"ZWS",
        }
    }
}

/// The fixed header at the start of every movie.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub compression: Compression,
    pub version: u8,
    /// The declared length of the whole movie when uncompressed. This is
    /// never used to bound decoding.
    pub file_length: u32,
    /// The stage bounds, in twips.
    pub frame_size: Rectangle,
    /// Frames per second.
    pub frame_rate: f32,
    pub frame_count: u16,
}

/// An error advancing over a movie header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Ran out of bytes.
    #[error(transparent)]
    Underrun(#[from] Underrun),
    /// Unrecognized signature.
    #[error("Unrecognized signature ({0:?}).")]
    UnsupportedFormat([u8; 3]),
}

/// The eight bytes preceding the frame rectangle.
#[repr(C)]
#[derive(FromBytes)]
struct Prefix {
    signature: [u8; 3],
    version: u8,
    file_length: U32,
}

/// State token to decode a movie header.
#[derive(Debug)]
pub struct MovieHeader;

impl MovieHeader {
    /// Transition to another state by decoding a movie header from the start
    /// of a cursor.
    ///
    /// Returns the header, and a successor state token.
    pub fn advance(r: &mut Cursor<'_>) -> Result<(Header, Scanning), HeaderError> {
        let Prefix {
            signature,
            version,
            file_length,
        } = zerocopy::transmute!(r.take::<8>()?);

        let compression = Compression::from_signature(signature)
            .ok_or(HeaderError::UnsupportedFormat(signature))?;

        let frame_size = Rectangle::read(r)?;
        let frame_rate = r.read_fixed8()?;
        let frame_count = r.read_u16()?;

        let header = Header {
            compression,
            version,
            file_length: file_length.get(),
            frame_size,
            frame_rate,
            frame_count,
        };

        debug!(?compression, version, frame_rate, frame_count, "decoded movie header");

        Ok((header, Scanning(())))
    }
}
