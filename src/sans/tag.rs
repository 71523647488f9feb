//! States processing the tag stream.
//!
//! Every tag opens with a two-byte little-endian code-and-length word: the
//! upper ten bits are the tag code, the lower six the body length. A length
//! of `0x3F` escapes to a four-byte length following the word.

use core::str::Utf8Error;

use either::Either::{self, Left, Right};
use tartan_bitfield::bitfield;
use thiserror::Error;
use tracing::{debug, trace};

use super::cursor::{Cursor, Underrun};

mod control;
mod scene;
mod shape;

pub use control::{End, FileAttributes, SetBackgroundColor, ShowFrame};
pub use scene::{DefineSceneAndFrameLabelData, FrameLabel, Scene};
pub use shape::{
    CapStyle, DefineShape, DefineShape4, FillStyle, Gradient, GradientRecord, InterpolationMode,
    JoinStyle, LineStyle, ShapeRecord, ShapeWithStyle, SpreadMode, StyleChange, Styles,
};

/// The short length value signalling a four-byte length.
const LONG_LENGTH: u8 = 0x3F;

/// A decoded tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    FileAttributes(FileAttributes),
    SetBackgroundColor(SetBackgroundColor),
    DefineSceneAndFrameLabelData(DefineSceneAndFrameLabelData),
    DefineShape(DefineShape),
    DefineShape2(DefineShape),
    DefineShape3(DefineShape),
    DefineShape4(DefineShape4),
    ShowFrame(ShowFrame),
    End(End),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Self::FileAttributes(_) => TagKind::FileAttributes,
            Self::SetBackgroundColor(_) => TagKind::SetBackgroundColor,
            Self::DefineSceneAndFrameLabelData(_) => TagKind::DefineSceneAndFrameLabelData,
            Self::DefineShape(_) => TagKind::DefineShape,
            Self::DefineShape2(_) => TagKind::DefineShape2,
            Self::DefineShape3(_) => TagKind::DefineShape3,
            Self::DefineShape4(_) => TagKind::DefineShape4,
            Self::ShowFrame(_) => TagKind::ShowFrame,
            Self::End(_) => TagKind::End,
        }
    }
}

/// The tag codes with a decoder.
#[repr(u16)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TagKind {
    End = 0,
    ShowFrame = 1,
    DefineShape = 2,
    SetBackgroundColor = 9,
    DefineShape2 = 22,
    DefineShape3 = 32,
    FileAttributes = 69,
    DefineShape4 = 83,
    DefineSceneAndFrameLabelData = 86,
}

impl TagKind {
    /// Identify a tag code, if it has a decoder.
    pub fn from_code(code: u16) -> Option<Self> {
        decoder(code).map(|(kind, _)| kind)
    }

    pub fn code(self) -> u16 {
        self as u16
    }
}

type Decode = fn(&mut Cursor<'_>) -> Result<Tag, TagError>;

/// Decoders for each recognized tag code. Codes absent here are skipped.
const DECODERS: [(TagKind, Decode); 9] = [
    (TagKind::End, control::decode_end),
    (TagKind::ShowFrame, control::decode_show_frame),
    (TagKind::DefineShape, shape::decode_define_shape),
    (TagKind::SetBackgroundColor, control::decode_set_background_color),
    (TagKind::DefineShape2, shape::decode_define_shape_2),
    (TagKind::DefineShape3, shape::decode_define_shape_3),
    (TagKind::FileAttributes, control::decode_file_attributes),
    (TagKind::DefineShape4, shape::decode_define_shape_4),
    (TagKind::DefineSceneAndFrameLabelData, scene::decode_define_scene_and_frame_label_data),
];

fn decoder(code: u16) -> Option<(TagKind, Decode)> {
    DECODERS.iter().copied().find(|(kind, _)| kind.code() == code)
}

/// An error advancing over a tag.
#[derive(Debug, Error)]
pub enum TagError {
    /// Ran out of bytes, either in the stream or within a tag body.
    #[error(transparent)]
    Underrun(#[from] Underrun),
    /// Unknown fill style type.
    #[error("Unknown fill style type ({0:#04x}).")]
    UnknownFillStyle(u8),
    /// A field held a reserved value.
    #[error("Reserved value ({value}) in {field}.")]
    Reserved { field: &'static str, value: u8 },
    /// A string was not valid UTF-8.
    #[error("Invalid string: {0}.")]
    InvalidString(#[from] Utf8Error),
}

bitfield! {
    struct CodeAndLength(u16) {
        [0..6] short_length: u8,
        [6..16] code: u16,
    }
}

/// The code and bounded body of a single tag.
#[derive(Clone, Debug)]
pub struct TagFrame<'a> {
    pub code: u16,
    /// The body length, after resolving a long length.
    pub length: u32,
    /// A cursor over exactly the body bytes.
    pub body: Cursor<'a>,
}

impl<'a> TagFrame<'a> {
    /// Read a tag header and carve out its body, advancing past both.
    pub fn read(r: &mut Cursor<'a>) -> Result<Self, Underrun> {
        let header = CodeAndLength(r.read_u16()?);
        let code = header.code();

        let length = match header.short_length() {
            LONG_LENGTH => r.read_u32()?,
            n => n as u32,
        };

        let body = r.sub_cursor(length as usize)?;

        trace!(code, length, "read tag frame");

        Ok(Self { code, length, body })
    }
}

/// State token to decode the next tag.
#[derive(Debug)]
pub struct Scanning(pub(super) ());

impl Scanning {
    /// Transition to another state by decoding one tag.
    ///
    /// Returns the tag if its code is recognized, and a successor state token.
    /// Unrecognized tags are consumed and return `None`.
    pub fn advance(
        self,
        r: &mut Cursor<'_>,
    ) -> Result<(Option<Tag>, Either<Scanning, Done>), TagError> {
        let TagFrame {
            code,
            length,
            mut body,
        } = TagFrame::read(r)?;

        let Some((kind, decode)) = decoder(code) else {
            debug!(code, length, "skipped unrecognized tag");
            return Ok((None, Left(self)));
        };

        let tag = decode(&mut body)?;

        let successor = match kind {
            TagKind::End => Right(Done(())),
            _ => Left(self),
        };

        Ok((Some(tag), successor))
    }
}

/// Terminal state token, reached after the End tag.
#[derive(Debug)]
pub struct Done(pub(super) ());
