//! Shape definition tags.
//!
//! The four DefineShape versions share one layout, differing in detail:
//!
//! - Version 1 limits the fill style table to 255 entries.
//! - Version 2 allows a 16-bit fill style count.
//! - Version 3 adds alpha to every color.
//! - Version 4 adds edge bounds, stroke scaling hints, and extended line
//!   styles with caps, joins and fills.
//!
//! Coordinates and deltas are in twips.

use alloc::vec::Vec;

use tartan_bitfield::bitfield;

use crate::sans::{
    cursor::{BitReader, Cursor},
    record::{Matrix, Rectangle, Rgb, Rgba},
};

use super::{Tag, TagError};

/// A shape from a DefineShape, DefineShape2 or DefineShape3 tag.
#[derive(Clone, Debug, PartialEq)]
pub struct DefineShape {
    pub id: u16,
    pub bounds: Rectangle,
    pub shapes: ShapeWithStyle,
}

/// A shape from a DefineShape4 tag.
#[derive(Clone, Debug, PartialEq)]
pub struct DefineShape4 {
    pub id: u16,
    pub bounds: Rectangle,
    /// Bounds excluding stroke widths.
    pub edge_bounds: Rectangle,
    pub uses_fill_winding_rule: bool,
    pub uses_non_scaling_strokes: bool,
    pub uses_scaling_strokes: bool,
    pub shapes: ShapeWithStyle,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeWithStyle {
    pub styles: Styles,
    pub records: Vec<ShapeRecord>,
}

/// Fill and line style tables, indexed from one by shape records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Styles {
    pub fill_styles: Vec<FillStyle>,
    pub line_styles: Vec<LineStyle>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FillStyle {
    Solid(Rgba),
    LinearGradient {
        matrix: Matrix,
        gradient: Gradient,
    },
    RadialGradient {
        matrix: Matrix,
        gradient: Gradient,
    },
    FocalRadialGradient {
        matrix: Matrix,
        gradient: Gradient,
        /// Position of the focal point along the radius, from -1 to 1.
        focal_point: f32,
    },
    Bitmap {
        id: u16,
        matrix: Matrix,
        repeating: bool,
        smoothed: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub spread: SpreadMode,
    pub interpolation: InterpolationMode,
    pub records: Vec<GradientRecord>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SpreadMode {
    Pad,
    Reflect,
    Repeat,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InterpolationMode {
    Rgb,
    LinearRgb,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GradientRecord {
    /// Position along the gradient, from 0 to 255.
    pub ratio: u8,
    pub color: Rgba,
}

/// A stroke style.
///
/// Versions before DefineShape4 only carry a width and color; the remaining
/// fields take their defaults (round caps and joins, scaling in both axes).
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub width: u16,
    pub fill: FillStyle,
    pub start_cap: CapStyle,
    pub end_cap: CapStyle,
    pub join: JoinStyle,
    pub no_h_scale: bool,
    pub no_v_scale: bool,
    pub pixel_hinting: bool,
    pub no_close: bool,
}

impl LineStyle {
    fn solid(width: u16, color: Rgba) -> Self {
        Self {
            width,
            fill: FillStyle::Solid(color),
            start_cap: CapStyle::Round,
            end_cap: CapStyle::Round,
            join: JoinStyle::Round,
            no_h_scale: false,
            no_v_scale: false,
            pixel_hinting: false,
            no_close: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CapStyle {
    Round,
    None,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JoinStyle {
    Round,
    Bevel,
    /// A miter join with its limit factor.
    Miter(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeRecord {
    StyleChange(StyleChange),
    StraightEdge {
        delta_x: i32,
        delta_y: i32,
    },
    CurvedEdge {
        control_delta_x: i32,
        control_delta_y: i32,
        anchor_delta_x: i32,
        anchor_delta_y: i32,
    },
}

/// Moves the pen or selects styles. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleChange {
    /// Absolute pen position.
    pub move_to: Option<(i32, i32)>,
    pub fill_style_0: Option<u32>,
    pub fill_style_1: Option<u32>,
    pub line_style: Option<u32>,
    /// Replacement style tables. Indices in this and later records refer to
    /// these.
    pub new_styles: Option<Styles>,
}

pub(super) fn decode_define_shape(r: &mut Cursor<'_>) -> Result<Tag, TagError> {
    Ok(Tag::DefineShape(read_define_shape(r, 1)?))
}

pub(super) fn decode_define_shape_2(r: &mut Cursor<'_>) -> Result<Tag, TagError> {
    Ok(Tag::DefineShape2(read_define_shape(r, 2)?))
}

pub(super) fn decode_define_shape_3(r: &mut Cursor<'_>) -> Result<Tag, TagError> {
    Ok(Tag::DefineShape3(read_define_shape(r, 3)?))
}

pub(super) fn decode_define_shape_4(r: &mut Cursor<'_>) -> Result<Tag, TagError> {
    bitfield! {
        struct Flags(u8) {
            [0] uses_scaling_strokes,
            [1] uses_non_scaling_strokes,
            [2] uses_fill_winding_rule,
        }
    }

    let id = r.read_u16()?;
    let bounds = Rectangle::read(r)?;
    let edge_bounds = Rectangle::read(r)?;
    let flags = Flags(r.read_u8()?);
    let shapes = read_shape_with_style(r, 4)?;

    Ok(Tag::DefineShape4(DefineShape4 {
        id,
        bounds,
        edge_bounds,
        uses_fill_winding_rule: flags.uses_fill_winding_rule(),
        uses_non_scaling_strokes: flags.uses_non_scaling_strokes(),
        uses_scaling_strokes: flags.uses_scaling_strokes(),
        shapes,
    }))
}

fn read_define_shape(r: &mut Cursor<'_>, version: u8) -> Result<DefineShape, TagError> {
    let id = r.read_u16()?;
    let bounds = Rectangle::read(r)?;
    let shapes = read_shape_with_style(r, version)?;

    Ok(DefineShape { id, bounds, shapes })
}

// Index widths for the shape records that follow a style table.
bitfield! {
    struct IndexBits(u8) {
        [0..4] line: u8,
        [4..8] fill: u8,
    }
}

fn read_shape_with_style(r: &mut Cursor<'_>, version: u8) -> Result<ShapeWithStyle, TagError> {
    let styles = read_styles(r, version)?;
    let index_bits = IndexBits(r.read_u8()?);
    let records = read_records(&mut r.bits(), version, index_bits)?;

    Ok(ShapeWithStyle { styles, records })
}

fn read_styles(r: &mut Cursor<'_>, version: u8) -> Result<Styles, TagError> {
    let fill_count = match r.read_u8()? {
        0xFF if version >= 2 => r.read_u16()?,
        n => n as u16,
    };

    let mut fill_styles = Vec::new();
    for _ in 0..fill_count {
        fill_styles.push(read_fill_style(r, version)?);
    }

    let line_count = match r.read_u8()? {
        0xFF => r.read_u16()?,
        n => n as u16,
    };

    let mut line_styles = Vec::new();
    for _ in 0..line_count {
        line_styles.push(read_line_style(r, version)?);
    }

    Ok(Styles {
        fill_styles,
        line_styles,
    })
}

fn read_color(r: &mut Cursor<'_>, version: u8) -> Result<Rgba, TagError> {
    Ok(if version >= 3 {
        Rgba::read(r)?
    } else {
        Rgb::read(r)?.into()
    })
}

fn read_fill_style(r: &mut Cursor<'_>, version: u8) -> Result<FillStyle, TagError> {
    let kind = r.read_u8()?;

    Ok(match kind {
        0x00 => FillStyle::Solid(read_color(r, version)?),
        0x10 => FillStyle::LinearGradient {
            matrix: Matrix::read(r)?,
            gradient: read_gradient(r, version)?,
        },
        0x12 => FillStyle::RadialGradient {
            matrix: Matrix::read(r)?,
            gradient: read_gradient(r, version)?,
        },
        0x13 => FillStyle::FocalRadialGradient {
            matrix: Matrix::read(r)?,
            gradient: read_gradient(r, version)?,
            focal_point: r.read_fixed8()?,
        },
        0x40..=0x43 => FillStyle::Bitmap {
            id: r.read_u16()?,
            matrix: Matrix::read(r)?,
            repeating: kind & 0b01 == 0,
            smoothed: kind & 0b10 == 0,
        },
        _ => Err(TagError::UnknownFillStyle(kind))?,
    })
}

fn read_gradient(r: &mut Cursor<'_>, version: u8) -> Result<Gradient, TagError> {
    bitfield! {
        struct GradientHeader(u8) {
            [0..4] count: u8,
            [4..6] interpolation: u8,
            [6..8] spread: u8,
        }
    }

    let header = GradientHeader(r.read_u8()?);

    let spread = match header.spread() {
        0 => SpreadMode::Pad,
        1 => SpreadMode::Reflect,
        2 => SpreadMode::Repeat,
        value => Err(TagError::Reserved {
            field: "spread mode",
            value,
        })?,
    };

    let interpolation = match header.interpolation() {
        0 => InterpolationMode::Rgb,
        1 => InterpolationMode::LinearRgb,
        value => Err(TagError::Reserved {
            field: "interpolation mode",
            value,
        })?,
    };

    let mut records = Vec::new();
    for _ in 0..header.count() {
        let ratio = r.read_u8()?;
        let color = read_color(r, version)?;
        records.push(GradientRecord { ratio, color });
    }

    Ok(Gradient {
        spread,
        interpolation,
        records,
    })
}

fn read_line_style(r: &mut Cursor<'_>, version: u8) -> Result<LineStyle, TagError> {
    let width = r.read_u16()?;

    if version < 4 {
        return Ok(LineStyle::solid(width, read_color(r, version)?));
    }

    bitfield! {
        struct Flags(u16) {
            [0..2] end_cap: u8,
            [2] no_close,
            [8] pixel_hinting,
            [9] no_v_scale,
            [10] no_h_scale,
            [11] has_fill,
            [12..14] join: u8,
            [14..16] start_cap: u8,
        }
    }

    // The flags are packed most significant bit first across both bytes.
    let flags = Flags(u16::from_be_bytes(r.take()?));

    let start_cap = cap_style(flags.start_cap())?;
    let end_cap = cap_style(flags.end_cap())?;

    let join = match flags.join() {
        0 => JoinStyle::Round,
        1 => JoinStyle::Bevel,
        2 => JoinStyle::Miter(r.read_fixed8()?),
        value => Err(TagError::Reserved {
            field: "join style",
            value,
        })?,
    };

    let fill = if flags.has_fill() {
        read_fill_style(r, version)?
    } else {
        FillStyle::Solid(Rgba::read(r)?)
    };

    Ok(LineStyle {
        width,
        fill,
        start_cap,
        end_cap,
        join,
        no_h_scale: flags.no_h_scale(),
        no_v_scale: flags.no_v_scale(),
        pixel_hinting: flags.pixel_hinting(),
        no_close: flags.no_close(),
    })
}

fn cap_style(value: u8) -> Result<CapStyle, TagError> {
    Ok(match value {
        0 => CapStyle::Round,
        1 => CapStyle::None,
        2 => CapStyle::Square,
        _ => Err(TagError::Reserved {
            field: "cap style",
            value,
        })?,
    })
}

/// Read shape records up to and including the end record.
fn read_records(
    bits: &mut BitReader<'_, '_>,
    version: u8,
    mut index_bits: IndexBits,
) -> Result<Vec<ShapeRecord>, TagError> {
    bitfield! {
        struct ChangeFlags(u8) {
            [0] move_to,
            [1] fill_style_0,
            [2] fill_style_1,
            [3] line_style,
            [4] new_styles,
        }
    }

    let mut records = Vec::new();

    loop {
        let is_edge = bits.read_bit()?;

        if is_edge {
            records.push(read_edge(bits)?);
            continue;
        }

        let flags = bits.read_ubits(5)? as u8;

        if flags == 0 {
            break;
        }

        let flags = ChangeFlags(flags);

        let mut change = StyleChange::default();

        if flags.move_to() {
            let n = bits.read_ubits(5)? as u8;
            change.move_to = Some((bits.read_sbits(n)?, bits.read_sbits(n)?));
        }

        if flags.fill_style_0() {
            change.fill_style_0 = Some(bits.read_ubits(index_bits.fill())?);
        }

        if flags.fill_style_1() {
            change.fill_style_1 = Some(bits.read_ubits(index_bits.fill())?);
        }

        if flags.line_style() {
            change.line_style = Some(bits.read_ubits(index_bits.line())?);
        }

        if flags.new_styles() {
            let r = bits.aligned();
            change.new_styles = Some(read_styles(r, version)?);
            index_bits = IndexBits(r.read_u8()?);
        }

        records.push(ShapeRecord::StyleChange(change));
    }

    Ok(records)
}

fn read_edge(bits: &mut BitReader<'_, '_>) -> Result<ShapeRecord, TagError> {
    let is_straight = bits.read_bit()?;
    let n = bits.read_ubits(4)? as u8 + 2;

    if !is_straight {
        return Ok(ShapeRecord::CurvedEdge {
            control_delta_x: bits.read_sbits(n)?,
            control_delta_y: bits.read_sbits(n)?,
            anchor_delta_x: bits.read_sbits(n)?,
            anchor_delta_y: bits.read_sbits(n)?,
        });
    }

    let (delta_x, delta_y) = if bits.read_bit()? {
        (bits.read_sbits(n)?, bits.read_sbits(n)?)
    } else if bits.read_bit()? {
        (0, bits.read_sbits(n)?)
    } else {
        (bits.read_sbits(n)?, 0)
    };

    Ok(ShapeRecord::StraightEdge { delta_x, delta_y })
}
