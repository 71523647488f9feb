//! Assembly of decoded tags into a movie.

use alloc::vec::Vec;

use crate::sans::{
    header::Header,
    tag::{FileAttributes, Tag},
};

use super::{FromTags, slice::Error};

/// A decoded movie.
#[derive(Clone, Debug, PartialEq)]
pub struct Movie {
    pub header: Header,
    pub file_attributes: FileAttributes,
    /// Recognized tags in stream order, excluding FileAttributes. The last tag
    /// is always [`Tag::End`].
    pub tags: Vec<Tag>,
}

/// Receiver collecting tags for a [`Movie`].
#[derive(Debug, Default)]
pub(crate) struct Assembly {
    file_attributes: Option<FileAttributes>,
    duplicate_file_attributes: bool,
    tags: Vec<Tag>,
}

impl FromTags for Assembly {
    fn add_tag(&mut self, tag: Tag) {
        match tag {
            Tag::FileAttributes(attributes) => {
                if self.file_attributes.replace(attributes).is_some() {
                    self.duplicate_file_attributes = true;
                }
            }
            tag => self.tags.push(tag),
        }
    }
}

impl Assembly {
    /// Combine the collected tags with a header.
    pub(crate) fn finish(self, header: Header) -> Result<Movie, Error> {
        if self.duplicate_file_attributes {
            Err(Error::DuplicateFileAttributes)?;
        }

        let file_attributes = self.file_attributes.ok_or(Error::MissingFileAttributes)?;

        Ok(Movie {
            header,
            file_attributes,
            tags: self.tags,
        })
    }
}
