//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use thiserror::Error;
use tracing::debug;

use crate::sans::header::Compression;

use super::{FromTags, Movie, slice};

extern crate std;

/// Signature, version and declared length, never compressed.
const PREFIX_LENGTH: usize = 8;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader, or from inflating its contents.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error decoding the movie once read.
    #[error(transparent)]
    Decode(#[from] slice::Error),
    /// The movie body uses a compression this build cannot undo.
    #[error("Unsupported compression ({0:?}).")]
    UnsupportedCompression(Compression),
}

/// Decode a movie from a reader.
///
/// This method is also re-exported as `flicker::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read) -> Result<Movie, Error> {
    Ok(slice::decode(&read_movie(r)?)?)
}

/// Decode a movie from a reader, publishing to a receiver.
///
/// This method is also re-exported as `flicker::avec::decode_reader_into`.
///
/// _Requires Cargo feature `std`._
pub fn decode_into(r: &mut impl Read, o: &mut impl FromTags) -> Result<(), Error> {
    Ok(slice::decode_into(&read_movie(r)?, o)?)
}

/// Read a whole movie, inflating its body if needed.
///
/// Returns the movie with its original eight-byte prefix (signature, version
/// and declared length) followed by the uncompressed body. A stream too short
/// to hold the prefix is returned as is, for the slice decoder to reject.
fn read_movie(r: &mut impl Read) -> Result<Vec<u8>, Error> {
    let mut data = Vec::new();
    r.by_ref().take(PREFIX_LENGTH as u64).read_to_end(&mut data)?;

    let Ok(prefix) = <[u8; PREFIX_LENGTH]>::try_from(data.as_slice()) else {
        return Ok(data);
    };

    let signature = [prefix[0], prefix[1], prefix[2]];
    let file_length = u32::from_le_bytes([prefix[4], prefix[5], prefix[6], prefix[7]]);

    match Compression::from_signature(signature) {
        // Unrecognized signatures are left for the slice decoder to reject.
        Some(Compression::Uncompressed) | None => {
            r.read_to_end(&mut data)?;
        }
        Some(Compression::Zlib) => {
            // The declared length covers the uncompressed prefix too.
            let limit = u64::from(file_length).saturating_sub(PREFIX_LENGTH as u64);
            inflate(r, limit, &mut data)?;
            debug!(inflated = data.len() - PREFIX_LENGTH, limit, "inflated movie body");
        }
        Some(compression @ Compression::Lzma) => {
            Err(Error::UnsupportedCompression(compression))?;
        }
    }

    Ok(data)
}

/// Inflate at most `limit` bytes of a zlib stream onto `data`.
#[cfg(feature = "zlib")]
fn inflate(r: &mut impl Read, limit: u64, data: &mut Vec<u8>) -> Result<(), Error> {
    flate2::read::ZlibDecoder::new(r).take(limit).read_to_end(data)?;
    Ok(())
}

#[cfg(not(feature = "zlib"))]
fn inflate(_: &mut impl Read, _: u64, _: &mut Vec<u8>) -> Result<(), Error> {
    Err(Error::UnsupportedCompression(Compression::Zlib))
}
