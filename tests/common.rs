mod support;

use either::Either::{Left, Right};
use flicker::{
    avec::{self, Movie, slice::Error},
    sans::{
        Decoder,
        cursor::{Cursor, Underrun},
        header::Compression,
        record::{Rectangle, Rgb},
        tag::{End, FileAttributes, SetBackgroundColor, ShowFrame, Tag, TagFrame, TagKind},
    },
};
use support::*;

/// The movie from the format's introductory example: a 400x300 pixel stage at
/// 15 frames per second, holding a single empty frame.
const INTRODUCTION: [u8; 30] = [
    b'F', b'W', b'S', 0x06, 0x13, 0x00, 0x00, 0x00, // signature, version, length
    0x70, 0x00, 0x0F, 0xA0, 0x00, 0x00, 0xBB, 0x80, // frame size
    0x00, 0x0F, 0x01, 0x00, // frame rate, frame count
    0x44, 0x11, 0x08, 0x00, 0x00, 0x00, // FileAttributes
    0x40, 0x00, // ShowFrame
    0x00, 0x00, // End
];

#[test]
fn decode_slice_introduction() {
    let movie = avec::decode_slice(&INTRODUCTION).unwrap();

    assert_eq!(movie.header.compression, Compression::Uncompressed);
    assert_eq!(movie.header.version, 6);
    assert_eq!(movie.header.file_length, 0x13);
    assert_eq!(
        movie.header.frame_size,
        Rectangle {
            x_min: 0,
            x_max: 8000,
            y_min: 0,
            y_max: 6000,
        }
    );
    assert_eq!(movie.header.frame_rate, 15.0);
    assert_eq!(movie.header.frame_count, 1);
    assert_eq!(
        movie.file_attributes,
        FileAttributes {
            actionscript3: true,
            ..Default::default()
        }
    );
    assert_eq!(movie.tags, [Tag::ShowFrame(ShowFrame), Tag::End(End)]);
}

#[test]
fn decode_slice_is_repeatable() {
    let data = movie(&[file_attributes(), show_frame(), show_frame(), end()]);

    let first = avec::decode_slice(&data).unwrap();
    let second = avec::decode_slice(&data).unwrap();

    assert_eq!(first, second);
}

#[test]
fn decode_slice_end_only() {
    let data = movie(&[file_attributes(), end()]);
    let Movie { tags, .. } = avec::decode_slice(&data).unwrap();
    assert_eq!(tags, [Tag::End(End)]);

    let data = movie(&[end()]);
    let err = avec::decode_slice(&data).unwrap_err();
    assert!(matches!(err, Error::MissingFileAttributes));
}

#[test]
fn decode_slice_duplicate_file_attributes() {
    let data = movie(&[file_attributes(), file_attributes(), end()]);
    let err = avec::decode_slice(&data).unwrap_err();
    assert!(matches!(err, Error::DuplicateFileAttributes));
}

#[test]
fn decode_slice_file_attributes_out_of_band() {
    let data = movie(&[show_frame(), file_attributes(), end()]);
    let movie = avec::decode_slice(&data).unwrap();

    assert!(movie.file_attributes.use_network);
    assert_eq!(movie.tags, [Tag::ShowFrame(ShowFrame), Tag::End(End)]);
}

#[test]
fn decode_slice_skips_unknown_tags() {
    let data = movie(&[
        file_attributes(),
        tag(SET_BACKGROUND_COLOR, &[0x10, 0x20, 0x30]),
        tag(UNKNOWN, &[0xFF; 12]),
        long_tag(UNKNOWN, &[0xAA; 200]),
        show_frame(),
        end(),
    ]);

    let movie = avec::decode_slice(&data).unwrap();

    assert_eq!(
        movie.tags,
        [
            Tag::SetBackgroundColor(SetBackgroundColor {
                color: Rgb {
                    red: 0x10,
                    green: 0x20,
                    blue: 0x30,
                },
            }),
            Tag::ShowFrame(ShowFrame),
            Tag::End(End),
        ]
    );
}

#[test]
fn decode_slice_stops_at_end() {
    let mut data = movie(&[file_attributes(), end()]);
    data.extend_from_slice(&[0xDE, 0xAD]);

    let movie = avec::decode_slice(&data).unwrap();
    assert_eq!(movie.tags, [Tag::End(End)]);
}

#[test]
fn decode_slice_missing_end() {
    let data = movie(&[file_attributes(), show_frame()]);
    let err = avec::decode_slice(&data).unwrap_err();

    assert!(matches!(
        err,
        Error::Underrun(Underrun {
            requested: 2,
            remaining: 0,
        })
    ));
}

#[test]
fn decode_slice_overlong_tag() {
    let mut data = movie(&[file_attributes()]);
    data.extend_from_slice(&((SHOW_FRAME << 6) | 10).to_le_bytes());
    data.extend_from_slice(&[0; 4]);

    let err = avec::decode_slice(&data).unwrap_err();

    assert!(matches!(
        err,
        Error::Underrun(Underrun {
            requested: 10,
            remaining: 4,
        })
    ));
}

#[test]
fn decode_slice_truncated_long_length() {
    let mut data = movie(&[file_attributes()]);
    data.extend_from_slice(&((DEFINE_SHAPE << 6) | 0x3F).to_le_bytes());
    data.extend_from_slice(&[0x10, 0x00]);

    let err = avec::decode_slice(&data).unwrap_err();

    assert!(matches!(
        err,
        Error::Underrun(Underrun {
            requested: 4,
            remaining: 2,
        })
    ));
}

#[test]
fn decode_slice_overlong_long_length() {
    let mut data = movie(&[file_attributes()]);
    data.extend_from_slice(&((DEFINE_SHAPE << 6) | 0x3F).to_le_bytes());
    data.extend_from_slice(&u32::MAX.to_le_bytes());
    data.extend_from_slice(&[0; 16]);
    data.extend_from_slice(&end());

    let err = avec::decode_slice(&data).unwrap_err();

    assert!(matches!(
        err,
        Error::Underrun(Underrun {
            requested: 0xFFFF_FFFF,
            remaining: 18,
        })
    ));
}

#[test]
fn decode_slice_unsupported_format() {
    let mut data = movie(&[file_attributes(), end()]);
    data[..3].copy_from_slice(b"GIF");

    let err = avec::decode_slice(&data).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(s) if &s == b"GIF"));
}

#[test]
fn decode_slice_truncated_header() {
    let err = avec::decode_slice(&INTRODUCTION[..12]).unwrap_err();
    assert!(matches!(err, Error::Underrun(_)));
}

#[test]
fn decode_slice_records_compression() {
    let mut data = INTRODUCTION;
    data[0] = b'C';

    let movie = avec::decode_slice(&data).unwrap();
    assert_eq!(movie.header.compression, Compression::Zlib);
}

#[test]
fn frame_short_length() {
    for length in [0, 1, 17, 62] {
        let mut data = tag(SHOW_FRAME, &vec![0x5A; length]);
        data.extend_from_slice(&[0xEE; 8]);

        let r = &mut Cursor::new(&data);
        let frame = TagFrame::read(r).unwrap();

        assert_eq!(frame.code, SHOW_FRAME);
        assert_eq!(frame.length, length as u32);
        assert_eq!(frame.body.remaining(), length);
        assert_eq!(r.position(), 2 + length);
    }
}

#[test]
fn frame_long_length() {
    for length in [0, 5, 62, 63, 64, 1000] {
        let mut data = long_tag(DEFINE_SHAPE, &vec![0x5A; length]);
        data.extend_from_slice(&[0xEE; 8]);

        let r = &mut Cursor::new(&data);
        let frame = TagFrame::read(r).unwrap();

        assert_eq!(frame.code, DEFINE_SHAPE);
        assert_eq!(frame.length, length as u32);
        assert_eq!(frame.body.position(), 0);
        assert_eq!(frame.body.remaining(), length);
        assert_eq!(r.position(), 2 + 4 + length);
    }
}

#[test]
fn frame_widest_code() {
    let data = tag(0x3FF, &[1, 2, 3]);
    let frame = TagFrame::read(&mut Cursor::new(&data)).unwrap();

    assert_eq!(frame.code, 0x3FF);
    assert_eq!(frame.length, 3);
}

#[test]
fn scanning_advances_past_unread_bytes() {
    // A SetBackgroundColor body with trailing padding the decoder never reads.
    let mut data = tag(SET_BACKGROUND_COLOR, &[1, 2, 3, 4, 5, 6]);
    data.extend_from_slice(&end());

    let r = &mut Cursor::new(&data);
    let (_, state) = Decoder::advance(&mut Cursor::new(&header(0, 0))).unwrap();

    let (tag, successor) = state.advance(r).unwrap();
    assert!(matches!(tag, Some(Tag::SetBackgroundColor(_))));
    assert_eq!(r.position(), 8);

    let Left(state) = successor else {
        panic!("stopped before the End tag");
    };

    let (tag, successor) = state.advance(r).unwrap();
    assert_eq!(tag, Some(Tag::End(End)));
    assert!(matches!(successor, Right(_)));
    assert!(r.is_empty());
}

#[test]
fn scanning_skips_unknown_tag() {
    let data = long_tag(UNKNOWN, &[0; 70]);

    let r = &mut Cursor::new(&data);
    let (_, state) = Decoder::advance(&mut Cursor::new(&header(0, 0))).unwrap();
    let (tag, successor) = state.advance(r).unwrap();

    assert_eq!(tag, None);
    assert!(matches!(successor, Left(_)));
    assert_eq!(r.position(), 76);
}

#[test]
fn tag_kind_codes() {
    assert_eq!(TagKind::from_code(0), Some(TagKind::End));
    assert_eq!(TagKind::from_code(69), Some(TagKind::FileAttributes));
    assert_eq!(
        TagKind::from_code(86),
        Some(TagKind::DefineSceneAndFrameLabelData)
    );
    assert_eq!(TagKind::from_code(UNKNOWN), None);
    assert_eq!(TagKind::from_code(0x3FF), None);
    assert_eq!(TagKind::DefineShape4.code(), DEFINE_SHAPE_4);
}

#[test]
fn tag_kinds_of_decoded_movie() {
    let data = movie(&[
        tag(SET_BACKGROUND_COLOR, &[0, 0, 0]),
        file_attributes(),
        show_frame(),
        end(),
    ]);

    let movie = avec::decode_slice(&data).unwrap();
    let kinds = movie.tags.iter().map(Tag::kind).collect::<Vec<_>>();

    assert_eq!(
        kinds,
        [TagKind::SetBackgroundColor, TagKind::ShowFrame, TagKind::End]
    );
    for kind in kinds {
        assert_eq!(TagKind::from_code(kind.code()), Some(kind));
    }
}

#[test]
fn compression_signatures() {
    for (signature, compression) in [
        (*b"FWS", Compression::Uncompressed),
        (*b"CWS", Compression::Zlib),
        (*b"ZWS", Compression::Lzma),
    ] {
        assert_eq!(Compression::from_signature(signature), Some(compression));
        assert_eq!(compression.signature(), signature);
    }

    assert_eq!(Compression::from_signature(*b"fws"), None);
}
