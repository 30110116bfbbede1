// face-kit/src/handle.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Encapsulates the information needed to locate and open a face.
//!
//! This is either the path to the font or the raw in-memory font data, plus the index of the face.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::FontLoadingError;
use crate::font_file::FontFile;
use crate::renderable_face::RenderableFace;

/// Encapsulates the information needed to locate and open a face.
#[derive(Debug, Clone)]
pub enum Handle {
    /// A font on disk referenced by a path.
    Path {
        /// The path to the font.
        path: PathBuf,
        /// The index of the face, if the path refers to a collection.
        ///
        /// If the path refers to a single font, this value will be 0.
        face_index: u32,
    },
    /// A font in memory.
    Memory {
        /// The raw TrueType/OpenType/etc. data that makes up this font.
        bytes: Arc<Vec<u8>>,
        /// The index of the face, if the memory consists of a collection.
        ///
        /// If the memory consists of a single font, this value will be 0.
        face_index: u32,
    },
}

impl Handle {
    #[inline]
    pub fn from_path(path: PathBuf, face_index: u32) -> Handle {
        Handle::Path { path, face_index }
    }

    #[inline]
    pub fn from_memory(bytes: Arc<Vec<u8>>, face_index: u32) -> Handle {
        Handle::Memory { bytes, face_index }
    }

    #[inline]
    pub fn face_index(&self) -> u32 {
        match *self {
            Handle::Path { face_index, .. } | Handle::Memory { face_index, .. } => face_index,
        }
    }

    /// Opens the font file this handle refers to.
    pub fn open(&self) -> Result<FontFile, FontLoadingError> {
        match *self {
            Handle::Path { ref path, .. } => FontFile::from_path(path),
            Handle::Memory { ref bytes, .. } => FontFile::from_bytes(bytes.clone()),
        }
    }

    /// Opens the font file and the face at the handle's index.
    pub fn load(&self) -> Result<RenderableFace, FontLoadingError> {
        self.open()?
            .create_renderable_face(self.face_index())
            .ok_or(FontLoadingError::NoSuchFontInCollection)
    }
}
