// face-kit/src/font_file.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A shared font file that opens renderable faces by index.

use log::debug;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

#[cfg(feature = "loader-ttf")]
use std::fs::File;
#[cfg(feature = "loader-ttf")]
use std::path::Path;

use crate::engine;
use crate::file_type::FileType;
use crate::loader::FaceLoader;
use crate::renderable_face::RenderableFace;

#[cfg(feature = "loader-ttf")]
use crate::error::FontLoadingError;
#[cfg(feature = "loader-ttf")]
use crate::loaders::default::TtfLoader;

/// A font file, shared by every face opened from it.
///
/// Cloning (or calling `retain`) shares the file. Each `RenderableFace` keeps its file alive.
#[derive(Clone)]
pub struct FontFile {
    loader: Arc<dyn FaceLoader>,
}

impl FontFile {
    /// Wraps a font engine loader.
    pub fn with_loader<L>(loader: L) -> FontFile where L: FaceLoader + 'static {
        FontFile { loader: Arc::new(loader) }
    }

    /// Loads a font file from raw font data (the contents of a `.ttf`/`.otf`/`.ttc`/etc. file).
    #[cfg(feature = "loader-ttf")]
    pub fn from_bytes(font_data: Arc<Vec<u8>>) -> Result<FontFile, FontLoadingError> {
        TtfLoader::from_bytes(font_data).map(FontFile::with_loader)
    }

    /// Loads a font file from a `.ttf`/`.otf`/`.ttc`/etc. file.
    #[cfg(feature = "loader-ttf")]
    pub fn from_file(file: &mut File) -> Result<FontFile, FontLoadingError> {
        TtfLoader::from_file(file).map(FontFile::with_loader)
    }

    /// Loads a font file from the path to a `.ttf`/`.otf`/`.ttc`/etc. file.
    #[cfg(feature = "loader-ttf")]
    pub fn from_path<P>(path: P) -> Result<FontFile, FontLoadingError> where P: AsRef<Path> {
        TtfLoader::from_path(path).map(FontFile::with_loader)
    }

    #[inline]
    pub fn file_type(&self) -> FileType {
        self.loader.file_type()
    }

    #[inline]
    pub fn face_count(&self) -> u32 {
        self.file_type().face_count()
    }

    /// Opens a new native handle for the face at `face_index`.
    ///
    /// Returns `None` if the index is out of range or the engine fails to open the face.
    pub fn create_renderable_face(&self, face_index: u32) -> Option<RenderableFace> {
        if face_index >= self.face_count() {
            debug!("create_renderable_face(): no face {} in a file of {}",
                   face_index,
                   self.face_count());
            return None
        }

        let native_face = {
            let _guard = engine::lock();
            self.loader.open_face(face_index)
        };

        match native_face {
            Ok(native_face) => Some(RenderableFace::create(self, native_face)),
            Err(error) => {
                debug!("create_renderable_face(): failed to open face {}: {}", face_index, error);
                None
            }
        }
    }

    /// Returns every typeface of the file.
    ///
    /// A face without named instances is returned as is. A variable face is expanded into one
    /// derived variation per named instance instead.
    pub fn renderable_faces(&self) -> Vec<RenderableFace> {
        let mut renderable_faces = vec![];

        for face_index in 0..self.face_count() {
            let renderable_face = match self.create_renderable_face(face_index) {
                Some(renderable_face) => renderable_face,
                None => continue,
            };

            let named_instances = renderable_face.named_instances();
            if named_instances.is_empty() {
                renderable_faces.push(renderable_face);
                continue
            }

            renderable_faces.extend(named_instances.iter().filter_map(|named_instance| {
                renderable_face.derive_variation(&named_instance.coordinates)
            }));
        }

        renderable_faces
    }

    #[inline]
    pub fn retain(&self) -> FontFile {
        self.clone()
    }

    /// Drops this reference. The file is released when the last reference goes away.
    #[inline]
    pub fn release(self) {}

    #[inline]
    pub fn retain_count(&self) -> usize {
        Arc::strong_count(&self.loader)
    }
}

impl Debug for FontFile {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_struct("FontFile")
            .field("file_type", &self.file_type())
            .field("retain_count", &self.retain_count())
            .finish()
    }
}
