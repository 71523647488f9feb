//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals. See [`crate::avec`] for implementations covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! A movie is decoded in two phases, each represented by a zero-size,
//! non-copy token. Once the cursor is positioned, transition to another state
//! by calling the token's `advance` method. This will return a successor
//! state token, along with any extracted data.
//!
//! - [`Decoder`] reads the fixed movie header and yields a
//!   [`Scanning`](tag::Scanning) token.
//! - [`Scanning`](tag::Scanning) reads exactly one tag per step and yields
//!   either another `Scanning` token or, after the End tag, the terminal
//!   [`Done`](tag::Done) token.
//!
//! Every tag body is handed to its decoder as a bounded sub-cursor, so the
//! stream always advances by the declared tag length regardless of how many
//! bytes the decoder consumed. A decoder can neither read into the next tag
//! nor leave the stream out of step.
//!
//! Some areas of the decoding process are not represented in the
//! finite-state machine and must be handled by the caller:
//!
//! - Decompressing the body of `CWS` and `ZWS` movies before decoding. The
//!   header only records which compression was declared.
//!
//! - Checking that the movie carried exactly one FileAttributes tag.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod cursor;
pub mod header;
pub mod record;
pub mod tag;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::MovieHeader;
