//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode whole movies from data slices and
//! readers, either into a [`Movie`] or by publishing to the [`FromTags`]
//! trait.
//!
//! When only some tags are of interest, the trait can be derived. See the
//! [`FromTags`](macro@FromTags) macro for details.
//!
//! All functions expect the body of a movie to be uncompressed, except for
//! the reader-based functions with the `zlib` feature, which inflate `CWS`
//! movies themselves.

pub mod movie;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

pub use movie::Movie;
#[cfg(feature = "std")]
pub use reader::{decode as decode_reader, decode_into as decode_reader_into};
pub use slice::{decode as decode_slice, decode_into as decode_slice_into};

use crate::sans::{header::Header, tag::Tag};

/// Derive [`FromTags`] for a struct collecting selected tags.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single tag, add the `tag(V)` attribute to an `Option<T>`
/// struct field, where `V` is a [`Tag`] variant and `T` its payload type.
/// Later tags of the same variant overwrite earlier ones. To collect every
/// occurrence, apply the attribute to a `Vec<T>` instead. To keep the movie
/// header, add the `header` attribute to an `Option<Header>` field.
///
/// ```
/// #[derive(Debug, Default, FromTags)]
/// struct Outlines {
///     #[header]
///     header: Option<Header>,
///     #[tag(SetBackgroundColor)]
///     background: Option<SetBackgroundColor>,
///     #[tag(DefineShape3)]
///     shapes: Vec<DefineShape>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use flicker_derive::FromTags;

/// Receive the decoded parts of a movie.
///
/// The header is published first, followed by every recognized tag in stream
/// order, including FileAttributes and the final End tag.
///
/// The default implementation of each method ignores received values.
///
/// See the [`FromTags`](macro@FromTags) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromTags {
    /// Add the movie header.
    fn add_header(&mut self, header: Header) {}
    /// Add a tag.
    fn add_tag(&mut self, tag: Tag) {}
}
