#![no_std]

//! An efficient decoder for the SWF movie container format.
//!
//! A movie is a fixed header followed by a stream of self-describing,
//! length-prefixed records called tags. Flicker walks that stream, decoding
//! the tags it recognizes (shapes, frame boundaries, scene metadata) and
//! skipping the rest, into an owned in-memory [`avec::Movie`].
//!
//! Most users should begin with the functions and derive macro in the
//! [`avec`] module. If these prove insufficient, consider driving the decoder
//! by hand as described in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoder (default).
//! - `zlib`: inflate zlib-compressed (`CWS`) movies in the reader-based
//!   decoder.

extern crate alloc;

pub mod avec;
pub mod sans;
