//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    cursor::{Cursor, Underrun},
    header::HeaderError,
    tag::{Scanning, TagError},
};

use super::{FromTags, Movie, movie::Assembly};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// Unexpectedly reached the end of the slice, or of a tag body.
    #[error("Unexpectedly reached the end of the data: {0}")]
    Underrun(Underrun),
    /// Unrecognized movie signature.
    #[error("Unrecognized movie signature ({0:?}).")]
    UnsupportedFormat([u8; 3]),
    /// A recognized tag held invalid data.
    #[error("Invalid tag: {0}")]
    Tag(TagError),
    /// The movie ended without a FileAttributes tag.
    #[error("Found no FileAttributes tag.")]
    MissingFileAttributes,
    /// The movie held more than one FileAttributes tag.
    #[error("Found more than one FileAttributes tag.")]
    DuplicateFileAttributes,
}

impl From<HeaderError> for Error {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::Underrun(err) => Self::Underrun(err),
            HeaderError::UnsupportedFormat(signature) => Self::UnsupportedFormat(signature),
        }
    }
}

impl From<TagError> for Error {
    fn from(err: TagError) -> Self {
        match err {
            TagError::Underrun(err) => Self::Underrun(err),
            err => Self::Tag(err),
        }
    }
}

/// Decode a movie from a slice.
///
/// This method is also re-exported as `flicker::avec::decode_slice`.
pub fn decode(r: &[u8]) -> Result<Movie, Error> {
    let r = &mut Cursor::new(r);

    let (header, state) = Decoder::advance(r)?;

    let mut assembly = Assembly::default();
    scan(r, state, &mut assembly)?;

    assembly.finish(header)
}

/// Decode a movie from a slice, publishing to a receiver.
///
/// Unlike [`decode`], this does not require a FileAttributes tag.
///
/// This method is also re-exported as `flicker::avec::decode_slice_into`.
pub fn decode_into(r: &[u8], o: &mut impl FromTags) -> Result<(), Error> {
    let r = &mut Cursor::new(r);

    let (header, state) = Decoder::advance(r)?;
    o.add_header(header);

    scan(r, state, o)
}

/// Publish tags until the End tag has been decoded.
fn scan(r: &mut Cursor<'_>, mut state: Scanning, o: &mut impl FromTags) -> Result<(), Error> {
    loop {
        let (tag, successor) = state.advance(r)?;

        if let Some(tag) = tag {
            o.add_tag(tag);
        }

        state = match successor {
            Left(state) => state,
            Right(_) => break,
        };
    }

    Ok(())
}
