// face-kit/src/loaders/ttf.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A pure-Rust font engine that uses `ttf-parser` to open faces and answer glyph queries.
//!
//! This is the default engine; it is compiled in by the `loader-ttf` Cargo feature.

use std::fmt::{self, Debug, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use ttf_parser::{Face, FaceParsingError, GlyphId, Tag};

use crate::engine::{self, Fixed};
use crate::error::{FontLoadingError, VariationError};
use crate::file_type::FileType;
use crate::loader::{BoundingBox, FaceLoader, Metrics, NativeFace};

/// Opens `ttf-parser` faces out of in-memory font data.
#[derive(Clone)]
pub struct TtfLoader {
    font_data: Arc<Vec<u8>>,
    file_type: FileType,
}

impl TtfLoader {
    /// Validates raw font data (the contents of a `.ttf`/`.otf`/`.ttc`/etc. file).
    pub fn from_bytes(font_data: Arc<Vec<u8>>) -> Result<TtfLoader, FontLoadingError> {
        let file_type = match ttf_parser::fonts_in_collection(&font_data) {
            Some(0) => return Err(FontLoadingError::Parse),
            Some(face_count) => FileType::Collection(face_count),
            None => {
                Face::parse(&font_data, 0).map_err(to_loading_error)?;
                FileType::Single
            }
        };

        Ok(TtfLoader { font_data, file_type })
    }

    /// Reads and validates a `.ttf`/`.otf`/`.ttc`/etc. file.
    pub fn from_file(file: &mut File) -> Result<TtfLoader, FontLoadingError> {
        let mut font_data = vec![];
        file.read_to_end(&mut font_data)?;
        TtfLoader::from_bytes(Arc::new(font_data))
    }

    #[inline]
    pub fn from_path<P>(path: P) -> Result<TtfLoader, FontLoadingError> where P: AsRef<Path> {
        TtfLoader::from_file(&mut File::open(path)?)
    }
}

impl FaceLoader for TtfLoader {
    #[inline]
    fn file_type(&self) -> FileType {
        self.file_type
    }

    fn open_face(&self, face_index: u32) -> Result<Box<dyn NativeFace>, FontLoadingError> {
        if face_index >= self.file_type.face_count() {
            return Err(FontLoadingError::NoSuchFontInCollection)
        }

        let face = TtfFace::from_bytes(self.font_data.clone(), face_index)?;
        Ok(Box::new(face))
    }
}

impl Debug for TtfLoader {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_struct("TtfLoader")
            .field("data_len", &self.font_data.len())
            .field("file_type", &self.file_type)
            .finish()
    }
}

/// A face parsed by `ttf-parser`, together with the variation coordinates applied to it.
pub struct TtfFace {
    // Declared before `font_data` so that the borrowing face is dropped first.
    face: Face<'static>,
    face_index: u32,
    font_data: Arc<Vec<u8>>,
}

impl TtfFace {
    /// Parses the face at `face_index` out of shared font data.
    pub fn from_bytes(font_data: Arc<Vec<u8>>, face_index: u32)
                      -> Result<TtfFace, FontLoadingError> {
        // SAFETY: the bytes live in the heap buffer of a `Vec` owned by the `Arc` we store next to
        // the face. The buffer is never mutated or moved while shared, and the face is dropped
        // before the `Arc` is.
        let face = unsafe {
            let bytes: &'static [u8] = std::mem::transmute(font_data.as_slice());
            Face::parse(bytes, face_index).map_err(to_loading_error)?
        };

        Ok(TtfFace { face, face_index, font_data })
    }
}

impl NativeFace for TtfFace {
    #[inline]
    fn face_index(&self) -> u32 {
        self.face_index
    }

    #[inline]
    fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    #[inline]
    fn glyph_count(&self) -> u16 {
        self.face.number_of_glyphs()
    }

    fn metrics(&self) -> Metrics {
        let bounding_box = self.face.global_bounding_box();
        let underline = self.face.underline_metrics();
        let strikeout = self.face.strikeout_metrics();
        Metrics {
            ascent: self.face.ascender() as i32,
            descent: self.face.descender() as i32,
            leading: self.face.line_gap() as i32,
            bounding_box: BoundingBox {
                x_min: bounding_box.x_min as i32,
                y_min: bounding_box.y_min as i32,
                x_max: bounding_box.x_max as i32,
                y_max: bounding_box.y_max as i32,
            },
            underline_position: underline.map_or(0, |line| line.position as i32),
            underline_thickness: underline.map_or(0, |line| line.thickness as i32),
            strikeout_position: strikeout.map_or(0, |line| line.position as i32),
            strikeout_thickness: strikeout.map_or(0, |line| line.thickness as i32),
        }
    }

    fn char_index(&self, code_point: u32) -> Option<u32> {
        let character = std::char::from_u32(code_point)?;
        self.face.glyph_index(character).map(|glyph_id| glyph_id.0 as u32)
    }

    fn char_variant_index(&self, code_point: u32, variation_selector: u32) -> Option<u32> {
        let character = std::char::from_u32(code_point)?;
        let selector = std::char::from_u32(variation_selector)?;
        self.face.glyph_variation_index(character, selector).map(|glyph_id| glyph_id.0 as u32)
    }

    #[inline]
    fn advance(&self, glyph_id: u16) -> Option<i32> {
        self.face.glyph_hor_advance(GlyphId(glyph_id)).map(i32::from)
    }

    #[inline]
    fn table(&self, table_tag: u32) -> Option<&[u8]> {
        self.face.raw_face().table(Tag(table_tag))
    }

    fn set_var_design_coordinates(&mut self, coordinates: &[Fixed]) -> Result<(), VariationError> {
        if coordinates.is_empty() {
            return Ok(())
        }
        if !self.face.is_variable() {
            return Err(VariationError::NotVariable)
        }

        let axes = self.face.variation_axes();
        if coordinates.len() > axes.len() as usize {
            return Err(VariationError::TooManyCoordinates {
                supplied: coordinates.len(),
                axes: axes.len() as usize,
            })
        }

        for (axis, &coordinate) in axes.into_iter().zip(coordinates) {
            let value = engine::fixed_to_f32(coordinate);
            if self.face.set_variation(axis.tag, value).is_none() {
                return Err(VariationError::NotVariable)
            }
        }

        Ok(())
    }
}

impl Debug for TtfFace {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_struct("TtfFace")
            .field("face_index", &self.face_index)
            .field("data_len", &self.font_data.len())
            .finish()
    }
}

fn to_loading_error(error: FaceParsingError) -> FontLoadingError {
    match error {
        FaceParsingError::UnknownMagic => FontLoadingError::UnknownFormat,
        FaceParsingError::FaceIndexOutOfBounds => FontLoadingError::NoSuchFontInCollection,
        _ => FontLoadingError::Parse,
    }
}
