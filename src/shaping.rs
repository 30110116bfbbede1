// face-kit/src/shaping.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The pluggable font abstraction a shaping engine consumes.
//!
//! A shaping engine asks a [`ShapingFace`] for raw table data and a [`ShapingFont`] for glyphs and
//! advances. Fonts answer glyph queries through an immutable [`FontFuncs`] table of callbacks, each
//! of which receives the font's own context value. Sub-fonts share their parent's face (and so
//! every table already loaded) while carrying their own callbacks, context and coordinates.

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, Mutex, PoisonError};

/// Immutable, shared table data.
pub type Blob = Arc<[u8]>;

type TableLoader = Box<dyn Fn(u32) -> Option<Blob> + Send + Sync>;

/// Face-level data shared by a font and all of its sub-fonts.
pub struct ShapingFace {
    loader: TableLoader,
    tables: Mutex<HashMap<u32, Option<Blob>>>,
    index: u32,
    upem: u32,
}

impl ShapingFace {
    /// Creates a face whose tables are fetched lazily by `loader` and kept afterwards.
    ///
    /// The loader returns `None` for a table the font does not have.
    pub fn for_tables<F>(loader: F) -> ShapingFace
                         where F: Fn(u32) -> Option<Blob> + Send + Sync + 'static {
        ShapingFace {
            loader: Box::new(loader),
            tables: Mutex::new(HashMap::new()),
            index: 0,
            upem: 1000,
        }
    }

    #[inline]
    pub fn set_index(&mut self, index: u32) {
        self.index = index
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn set_upem(&mut self, upem: u32) {
        self.upem = upem
    }

    #[inline]
    pub fn upem(&self) -> u32 {
        self.upem
    }

    /// Returns the data of a table, loading it on first use.
    pub fn reference_table(&self, table_tag: u32) -> Option<Blob> {
        if let Some(table) = self.lock_tables().get(&table_tag) {
            return table.clone()
        }

        // Not loaded under the table mutex: the loader takes the engine lock.
        let table = (self.loader)(table_tag);
        self.lock_tables().entry(table_tag).or_insert(table).clone()
    }

    /// The number of distinct tables requested so far, present or not.
    pub fn loaded_table_count(&self) -> usize {
        self.lock_tables().len()
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<HashMap<u32, Option<Blob>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for ShapingFace {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_struct("ShapingFace")
            .field("index", &self.index)
            .field("upem", &self.upem)
            .finish()
    }
}

pub type NominalGlyphFunc<T> = fn(data: &T, unicode: u32) -> Option<u32>;
pub type NominalGlyphsFunc<T> = fn(data: &T, unicodes: &[u32], glyphs: &mut [u32]) -> usize;
pub type VariationGlyphFunc<T> = fn(data: &T, unicode: u32, variation_selector: u32)
                                    -> Option<u32>;
pub type GlyphHAdvanceFunc<T> = fn(data: &T, glyph: u32) -> i32;
pub type GlyphHAdvancesFunc<T> = fn(data: &T, glyphs: &[u32], advances: &mut [i32]);

/// A table of glyph callbacks, typically built once and kept for the life of the process.
///
/// Callbacks never fail: a missing glyph is reported as `None` or a short count.
pub struct FontFuncs<T> {
    nominal_glyph: Option<NominalGlyphFunc<T>>,
    nominal_glyphs: Option<NominalGlyphsFunc<T>>,
    variation_glyph: Option<VariationGlyphFunc<T>>,
    glyph_h_advance: Option<GlyphHAdvanceFunc<T>>,
    glyph_h_advances: Option<GlyphHAdvancesFunc<T>>,
}

impl<T> FontFuncs<T> {
    pub fn new() -> FontFuncs<T> {
        FontFuncs {
            nominal_glyph: None,
            nominal_glyphs: None,
            variation_glyph: None,
            glyph_h_advance: None,
            glyph_h_advances: None,
        }
    }

    #[inline]
    pub fn set_nominal_glyph_func(&mut self, func: NominalGlyphFunc<T>) {
        self.nominal_glyph = Some(func)
    }

    /// Maps a run of code points, stopping at the first one without a glyph.
    #[inline]
    pub fn set_nominal_glyphs_func(&mut self, func: NominalGlyphsFunc<T>) {
        self.nominal_glyphs = Some(func)
    }

    #[inline]
    pub fn set_variation_glyph_func(&mut self, func: VariationGlyphFunc<T>) {
        self.variation_glyph = Some(func)
    }

    #[inline]
    pub fn set_glyph_h_advance_func(&mut self, func: GlyphHAdvanceFunc<T>) {
        self.glyph_h_advance = Some(func)
    }

    /// Writes the advance of every glyph in a run.
    #[inline]
    pub fn set_glyph_h_advances_func(&mut self, func: GlyphHAdvancesFunc<T>) {
        self.glyph_h_advances = Some(func)
    }
}

/// The glyph queries a font context can answer, in the shape of the callback table.
pub trait FontCallbacks {
    fn nominal_glyph(&self, unicode: u32) -> Option<u32>;

    /// Maps leading code points and returns how many were mapped.
    fn nominal_glyphs(&self, unicodes: &[u32], glyphs: &mut [u32]) -> usize;

    fn variation_glyph(&self, unicode: u32, variation_selector: u32) -> Option<u32>;

    fn glyph_h_advance(&self, glyph: u32) -> i32;

    /// Writes an advance for every glyph.
    fn glyph_h_advances(&self, glyphs: &[u32], advances: &mut [i32]);
}

impl<T> FontFuncs<T> where T: FontCallbacks {
    /// Builds a complete callback table that forwards every query to `T`.
    pub fn from_callbacks() -> FontFuncs<T> {
        let mut funcs = FontFuncs::new();
        funcs.set_nominal_glyph_func(T::nominal_glyph);
        funcs.set_nominal_glyphs_func(T::nominal_glyphs);
        funcs.set_variation_glyph_func(T::variation_glyph);
        funcs.set_glyph_h_advance_func(T::glyph_h_advance);
        funcs.set_glyph_h_advances_func(T::glyph_h_advances);
        funcs
    }
}

impl<T> Default for FontFuncs<T> {
    fn default() -> FontFuncs<T> {
        FontFuncs::new()
    }
}

/// A font object: a shared face, a callback table, a callback context and design coordinates.
pub struct ShapingFont<T: 'static> {
    face: Arc<ShapingFace>,
    funcs: &'static FontFuncs<T>,
    data: Arc<T>,
    coords: Vec<f32>,
}

impl<T: 'static> ShapingFont<T> {
    pub fn new(face: Arc<ShapingFace>, funcs: &'static FontFuncs<T>, data: Arc<T>)
               -> ShapingFont<T> {
        ShapingFont { face, funcs, data, coords: vec![] }
    }

    /// Creates a font that shares this font's face and starts at its coordinates, but answers
    /// glyph queries through its own callbacks and context.
    pub fn create_sub_font<U: 'static>(&self, funcs: &'static FontFuncs<U>, data: Arc<U>)
                              -> ShapingFont<U> {
        ShapingFont { face: self.face.clone(), funcs, data, coords: self.coords.clone() }
    }

    #[inline]
    pub fn face(&self) -> &Arc<ShapingFace> {
        &self.face
    }

    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    #[inline]
    pub fn set_var_coords_design(&mut self, coords: &[f32]) {
        self.coords = coords.to_vec()
    }

    #[inline]
    pub fn var_coords_design(&self) -> &[f32] {
        &self.coords
    }

    pub fn nominal_glyph(&self, unicode: u32) -> Option<u32> {
        self.funcs.nominal_glyph.and_then(|func| func(&self.data, unicode))
    }

    /// Maps leading code points to glyphs and returns how many were mapped.
    pub fn nominal_glyphs(&self, unicodes: &[u32], glyphs: &mut [u32]) -> usize {
        if let Some(func) = self.funcs.nominal_glyphs {
            return func(&self.data, unicodes, glyphs)
        }

        let mut done = 0;
        for (&unicode, glyph) in unicodes.iter().zip(glyphs.iter_mut()) {
            match self.nominal_glyph(unicode) {
                Some(glyph_id) => *glyph = glyph_id,
                None => break,
            }
            done += 1;
        }
        done
    }

    pub fn variation_glyph(&self, unicode: u32, variation_selector: u32) -> Option<u32> {
        self.funcs.variation_glyph.and_then(|func| func(&self.data, unicode, variation_selector))
    }

    pub fn glyph_h_advance(&self, glyph: u32) -> i32 {
        self.funcs.glyph_h_advance.map_or(0, |func| func(&self.data, glyph))
    }

    pub fn glyph_h_advances(&self, glyphs: &[u32], advances: &mut [i32]) {
        if let Some(func) = self.funcs.glyph_h_advances {
            return func(&self.data, glyphs, advances)
        }

        for (&glyph, advance) in glyphs.iter().zip(advances.iter_mut()) {
            *advance = self.glyph_h_advance(glyph);
        }
    }
}

impl<T: 'static> Debug for ShapingFont<T> {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_struct("ShapingFont")
            .field("face", &self.face)
            .field("coords", &self.coords)
            .finish()
    }
}
