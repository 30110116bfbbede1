// face-kit/src/loader.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Provides a common interface to the font engine that opens faces and answers glyph queries.

use crate::engine::Fixed;
use crate::error::{FontLoadingError, VariationError};
use crate::file_type::FileType;

/// Various metrics that apply to the entire face, in font units.
///
/// Values come from the face's current variation instance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    /// The maximum amount the face rises above the baseline.
    pub ascent: i32,

    /// The maximum amount the face descends below the baseline.
    ///
    /// NB: This is typically a negative value.
    pub descent: i32,

    /// The extra distance between the descent of one line and the ascent of the next.
    pub leading: i32,

    /// The smallest rectangle enclosing every glyph of the face.
    pub bounding_box: BoundingBox,

    pub underline_position: i32,

    pub underline_thickness: i32,

    pub strikeout_position: i32,

    pub strikeout_thickness: i32,
}

/// An axis-aligned rectangle in font units, with y pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

/// One opened, mutable font-engine face handle.
///
/// A native face is not thread-safe by itself. It is only ever touched while the global engine
/// lock is held, which `RenderableFace` enforces.
pub trait NativeFace: Send {
    /// The zero-based index of this face within its font file.
    fn face_index(&self) -> u32;

    /// The number of font units per em.
    fn units_per_em(&self) -> u16;

    /// The number of glyphs in the face.
    fn glyph_count(&self) -> u16;

    /// Returns the face-wide metrics. Line metrics the face does not declare are 0.
    fn metrics(&self) -> Metrics;

    /// Returns the nominal glyph for a Unicode code point, if the character map has one.
    fn char_index(&self, code_point: u32) -> Option<u32>;

    /// Returns the glyph for a code point followed by a variation selector, if there is one.
    fn char_variant_index(&self, code_point: u32, variation_selector: u32) -> Option<u32>;

    /// Returns the unscaled horizontal advance of a glyph, in font units, at the current
    /// variation coordinates.
    fn advance(&self, glyph_id: u16) -> Option<i32>;

    /// Returns the raw bytes of an sfnt table.
    fn table(&self, table_tag: u32) -> Option<&[u8]>;

    /// Moves the face to the given design-space coordinates, one per variation axis in `fvar`
    /// order. Axes without a coordinate keep their default value.
    fn set_var_design_coordinates(&mut self, coordinates: &[Fixed]) -> Result<(), VariationError>;
}

/// Opens native faces out of one font file.
pub trait FaceLoader: Send + Sync {
    /// Determines whether the file holds a single face or a collection.
    fn file_type(&self) -> FileType;

    /// Opens a fresh native handle for the face at `face_index`.
    ///
    /// Callers hold the global engine lock for the duration of this call.
    fn open_face(&self, face_index: u32) -> Result<Box<dyn NativeFace>, FontLoadingError>;
}
