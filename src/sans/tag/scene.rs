//! Scene and frame label metadata for the main timeline.

use alloc::{string::String, vec::Vec};

use crate::sans::cursor::Cursor;

use super::{Tag, TagError};

/// Scene boundaries and frame labels for the main timeline.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DefineSceneAndFrameLabelData {
    pub scenes: Vec<Scene>,
    pub frame_labels: Vec<FrameLabel>,
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Scene {
    /// The zero-based frame at which the scene starts.
    pub offset: u32,
    pub name: String,
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FrameLabel {
    /// The zero-based frame carrying the label.
    pub frame: u32,
    pub label: String,
}

pub(super) fn decode_define_scene_and_frame_label_data(
    r: &mut Cursor<'_>,
) -> Result<Tag, TagError> {
    let scene_count = r.read_encoded_u32()?;
    let mut scenes = Vec::new();

    for _ in 0..scene_count {
        let offset = r.read_encoded_u32()?;
        let name = read_string(r)?;
        scenes.push(Scene { offset, name });
    }

    let label_count = r.read_encoded_u32()?;
    let mut frame_labels = Vec::new();

    for _ in 0..label_count {
        let frame = r.read_encoded_u32()?;
        let label = read_string(r)?;
        frame_labels.push(FrameLabel { frame, label });
    }

    Ok(Tag::DefineSceneAndFrameLabelData(
        DefineSceneAndFrameLabelData {
            scenes,
            frame_labels,
        },
    ))
}

fn read_string(r: &mut Cursor<'_>) -> Result<String, TagError> {
    Ok(core::str::from_utf8(r.read_cstr()?)?.into())
}
