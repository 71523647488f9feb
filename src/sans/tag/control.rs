//! Tags carrying movie-wide settings and frame boundaries.

use tartan_bitfield::bitfield;

use crate::sans::{cursor::Cursor, record::Rgb};

use super::{Tag, TagError};

/// Container-wide capability flags.
///
/// Expected once per movie, as its first tag.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct FileAttributes {
    pub use_direct_blit: bool,
    pub use_gpu: bool,
    pub has_metadata: bool,
    pub actionscript3: bool,
    pub no_cross_domain_cache: bool,
    pub use_network: bool,
}

/// The stage background color.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SetBackgroundColor {
    pub color: Rgb,
}

/// Marks the end of a frame's display list updates.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ShowFrame;

/// Marks the end of the tag stream.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct End;

pub(super) fn decode_file_attributes(r: &mut Cursor<'_>) -> Result<Tag, TagError> {
    bitfield! {
        struct Flags(u32) {
            [0] use_network,
            [2] no_cross_domain_cache,
            [3] actionscript3,
            [4] has_metadata,
            [5] use_gpu,
            [6] use_direct_blit,
        }
    }

    let flags = Flags(r.read_u32()?);

    Ok(Tag::FileAttributes(FileAttributes {
        use_direct_blit: flags.use_direct_blit(),
        use_gpu: flags.use_gpu(),
        has_metadata: flags.has_metadata(),
        actionscript3: flags.actionscript3(),
        no_cross_domain_cache: flags.no_cross_domain_cache(),
        use_network: flags.use_network(),
    }))
}

pub(super) fn decode_set_background_color(r: &mut Cursor<'_>) -> Result<Tag, TagError> {
    Ok(Tag::SetBackgroundColor(SetBackgroundColor {
        color: Rgb::read(r)?,
    }))
}

pub(super) fn decode_show_frame(_: &mut Cursor<'_>) -> Result<Tag, TagError> {
    Ok(Tag::ShowFrame(ShowFrame))
}

pub(super) fn decode_end(_: &mut Cursor<'_>) -> Result<Tag, TagError> {
    Ok(Tag::End(End))
}
