// face-kit/src/shapable_face.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Adapts a renderable face to the shaping engine's font abstraction.

use log::debug;
use std::convert::TryFrom;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::advance_cache::AdvanceCache;
use crate::engine::EngineCell;
use crate::renderable_face::{FaceLock, RenderableFace};
use crate::shaping::{Blob, FontCallbacks, FontFuncs, ShapingFace, ShapingFont};

lazy_static! {
    static ref FONT_FUNCS: FontFuncs<GlyphContext> = FontFuncs::from_callbacks();
}

/// The callback context of one shaping font: the face to query and its advance cache.
///
/// Each shapable face, derived or not, has its own context, so glyph and advance queries resolve
/// against its own variation instance.
pub struct GlyphContext {
    renderable_face: RenderableFace,
    advance_cache: EngineCell<AdvanceCache>,
}

impl GlyphContext {
    fn new(renderable_face: &RenderableFace) -> GlyphContext {
        GlyphContext {
            renderable_face: renderable_face.retain(),
            advance_cache: EngineCell::new(AdvanceCache::new()),
        }
    }

    /// Answers from the cache, or asks the engine and remembers the answer.
    ///
    /// Glyph IDs beyond the engine's 16-bit range get 0 rather than being truncated to a
    /// different glyph.
    fn lookup_advance(&self, lock: &mut FaceLock<'_>, glyph: u32) -> i32 {
        let glyph_id = match u16::try_from(glyph) {
            Ok(glyph_id) => glyph_id,
            Err(_) => return 0,
        };

        if let Some(advance) = self.advance_cache.borrow_mut(lock.guard()).get(glyph_id) {
            return advance
        }

        let advance = lock.native_face().advance(glyph_id).unwrap_or(0);
        self.advance_cache.borrow_mut(lock.guard()).put(glyph_id, advance);
        advance
    }
}

impl FontCallbacks for GlyphContext {
    fn nominal_glyph(&self, unicode: u32) -> Option<u32> {
        let mut lock = self.renderable_face.lock();
        lock.native_face().char_index(unicode).filter(|&glyph_id| glyph_id != 0)
    }

    fn nominal_glyphs(&self, unicodes: &[u32], glyphs: &mut [u32]) -> usize {
        let mut lock = self.renderable_face.lock();
        let native_face = lock.native_face();

        let mut done = 0;
        for (&unicode, glyph) in unicodes.iter().zip(glyphs.iter_mut()) {
            match native_face.char_index(unicode) {
                Some(glyph_id) if glyph_id != 0 => *glyph = glyph_id,
                _ => break,
            }
            done += 1;
        }
        done
    }

    fn variation_glyph(&self, unicode: u32, variation_selector: u32) -> Option<u32> {
        let mut lock = self.renderable_face.lock();
        lock.native_face()
            .char_variant_index(unicode, variation_selector)
            .filter(|&glyph_id| glyph_id != 0)
    }

    fn glyph_h_advance(&self, glyph: u32) -> i32 {
        let mut lock = self.renderable_face.lock();
        self.lookup_advance(&mut lock, glyph)
    }

    fn glyph_h_advances(&self, glyphs: &[u32], advances: &mut [i32]) {
        let mut lock = self.renderable_face.lock();
        for (&glyph, advance) in glyphs.iter().zip(advances.iter_mut()) {
            *advance = self.lookup_advance(&mut lock, glyph);
        }
    }
}

/// A face the shaping engine can shape text with.
///
/// A root shapable face owns a shaping face that loads font tables out of its renderable face. A
/// face derived with [`ShapableFace::derive_variation`] reuses the root's shaping face, and so
/// every table the root already parsed, while answering glyph and advance queries from its own
/// renderable face and its own advance cache.
///
/// Cloning (or calling `retain`) shares the face.
#[derive(Clone)]
pub struct ShapableFace {
    inner: Arc<ShapableFaceInner>,
}

struct ShapableFaceInner {
    // Dropped before the root so that the root outlives every sub-font of its face.
    font: ShapingFont<GlyphContext>,
    root_face: Option<ShapableFace>,
}

impl ShapableFace {
    /// The callback table shared by every shapable face in the process.
    #[inline]
    pub fn font_funcs() -> &'static FontFuncs<GlyphContext> {
        &FONT_FUNCS
    }

    /// Builds a new shaping font, with a fresh shaping face, on top of a renderable face.
    pub fn create(renderable_face: &RenderableFace) -> ShapableFace {
        let (face_index, units_per_em) = {
            let mut lock = renderable_face.lock();
            let native_face = lock.native_face();
            (native_face.face_index(), native_face.units_per_em())
        };

        let table_source = renderable_face.retain();
        let mut shaping_face = ShapingFace::for_tables(move |table_tag| {
            load_table(&table_source, table_tag)
        });
        shaping_face.set_index(face_index);
        shaping_face.set_upem(units_per_em as u32);

        let context = Arc::new(GlyphContext::new(renderable_face));
        let mut font = ShapingFont::new(Arc::new(shaping_face), ShapableFace::font_funcs(), context);
        setup_coordinates(&mut font, renderable_face);

        debug!("created shapable face {} ({} units per em)", face_index, units_per_em);
        ShapableFace { inner: Arc::new(ShapableFaceInner { font, root_face: None }) }
    }

    /// Builds a sub-font of the root face that answers glyph queries from `renderable_face`.
    ///
    /// The root is this face itself, or the face this one was derived from.
    pub fn derive_variation(&self, renderable_face: &RenderableFace) -> ShapableFace {
        let root_face = self.inner.root_face.as_ref().unwrap_or(self);

        let context = Arc::new(GlyphContext::new(renderable_face));
        let mut font = root_face.inner.font.create_sub_font(ShapableFace::font_funcs(), context);
        setup_coordinates(&mut font, renderable_face);

        ShapableFace {
            inner: Arc::new(ShapableFaceInner { font, root_face: Some(root_face.retain()) }),
        }
    }

    #[inline]
    pub fn renderable_face(&self) -> &RenderableFace {
        &self.inner.font.data().renderable_face
    }

    #[inline]
    pub fn shaping_font(&self) -> &ShapingFont<GlyphContext> {
        &self.inner.font
    }

    #[inline]
    pub fn shaping_face(&self) -> &Arc<ShapingFace> {
        self.inner.font.face()
    }

    /// The face whose shaping face this one shares, if it was derived.
    #[inline]
    pub fn root_face(&self) -> Option<&ShapableFace> {
        self.inner.root_face.as_ref()
    }

    #[inline]
    pub fn nominal_glyph(&self, unicode: u32) -> Option<u32> {
        self.inner.font.nominal_glyph(unicode)
    }

    /// Maps leading code points to glyphs, stopping at the first code point without one. Returns
    /// the number of glyphs written.
    #[inline]
    pub fn nominal_glyphs(&self, unicodes: &[u32], glyphs: &mut [u32]) -> usize {
        self.inner.font.nominal_glyphs(unicodes, glyphs)
    }

    #[inline]
    pub fn variation_glyph(&self, unicode: u32, variation_selector: u32) -> Option<u32> {
        self.inner.font.variation_glyph(unicode, variation_selector)
    }

    /// The unscaled horizontal advance of a glyph, in font units.
    #[inline]
    pub fn glyph_h_advance(&self, glyph: u32) -> i32 {
        self.inner.font.glyph_h_advance(glyph)
    }

    #[inline]
    pub fn glyph_h_advances(&self, glyphs: &[u32], advances: &mut [i32]) {
        self.inner.font.glyph_h_advances(glyphs, advances)
    }

    #[cfg(test)]
    pub(crate) fn cached_advance(&self, glyph_id: u16) -> Option<i32> {
        let context = self.inner.font.data();
        let mut lock = context.renderable_face.lock();
        context.advance_cache.borrow_mut(lock.guard()).get(glyph_id)
    }

    #[cfg(test)]
    pub(crate) fn cached_advance_count(&self) -> usize {
        let context = self.inner.font.data();
        let mut lock = context.renderable_face.lock();
        context.advance_cache.borrow_mut(lock.guard()).len()
    }

    #[inline]
    pub fn retain(&self) -> ShapableFace {
        self.clone()
    }

    /// Drops this reference. The face is destroyed when the last reference goes away.
    #[inline]
    pub fn release(self) {}

    #[inline]
    pub fn retain_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ShapableFace) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for ShapableFace {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_struct("ShapableFace")
            .field("font", &self.inner.font)
            .field("derived", &self.inner.root_face.is_some())
            .finish()
    }
}

fn setup_coordinates(font: &mut ShapingFont<GlyphContext>, renderable_face: &RenderableFace) {
    if let Some(coordinates) = renderable_face.coordinates() {
        font.set_var_coords_design(coordinates);
    }
}

/// Copies a table out of the native face. An empty table counts as absent.
fn load_table(renderable_face: &RenderableFace, table_tag: u32) -> Option<Blob> {
    let mut lock = renderable_face.lock();
    match lock.native_face().table(table_tag) {
        Some(table) if !table.is_empty() => Some(Blob::from(table)),
        _ => None,
    }
}
