// face-kit/src/renderable_face.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A shared, variation-aware owner of one native font-engine face.

use log::{debug, warn};
use std::fmt::{self, Debug, Formatter};
use std::mem::ManuallyDrop;
use std::sync::{Arc, OnceLock};

use crate::engine::{self, EngineCell, EngineGuard};
use crate::error::VariationError;
use crate::font_file::FontFile;
use crate::loader::{Metrics, NativeFace};
use crate::variation::{FontVariations, NamedInstance, VariationAxis, FVAR_TABLE_TAG};

/// A reference-counted owner of one opened font-engine face.
///
/// Cloning (or calling `retain`) shares the face; the native handle is destroyed when the last
/// holder drops it. Every access to the handle goes through [`RenderableFace::lock`], which holds
/// the global engine lock for as long as the returned [`FaceLock`] lives.
///
/// Variation coordinates are set at most once, before the face is shared. A different variation
/// instance is always a different `RenderableFace` with its own native handle; see
/// [`RenderableFace::derive_variation`].
#[derive(Clone)]
pub struct RenderableFace {
    inner: Arc<RenderableFaceInner>,
}

struct RenderableFaceInner {
    // Fields drop in declaration order: the native handle is torn down under the engine lock
    // first, and the font file is released afterwards, outside of it.
    resource: FaceResource,
    font_file: FontFile,
}

struct FaceResource {
    native_face: EngineCell<ManuallyDrop<Box<dyn NativeFace>>>,
    coordinates: OnceLock<Vec<f32>>,
}

impl Drop for FaceResource {
    fn drop(&mut self) {
        let native_face = self.native_face.get_mut();
        let _guard = engine::lock();
        // SAFETY: this is the only place the handle is dropped, and nothing can reach it again.
        unsafe { ManuallyDrop::drop(native_face) }
    }
}

/// Scoped access to a face's native handle. The global engine lock is released on drop.
pub struct FaceLock<'a> {
    guard: EngineGuard,
    resource: &'a FaceResource,
}

impl<'a> FaceLock<'a> {
    #[inline]
    pub fn native_face(&mut self) -> &mut dyn NativeFace {
        let native_face = self.resource.native_face.borrow_mut(&mut self.guard);
        &mut ***native_face
    }

    /// The engine guard held by this lock, for reaching other lock-protected state in the same
    /// critical section.
    #[inline]
    pub fn guard(&mut self) -> &mut EngineGuard {
        &mut self.guard
    }
}

impl RenderableFace {
    /// Takes ownership of an opened native face and a shared reference to the file it came from.
    pub fn create(font_file: &FontFile, native_face: Box<dyn NativeFace>) -> RenderableFace {
        RenderableFace {
            inner: Arc::new(RenderableFaceInner {
                resource: FaceResource {
                    native_face: EngineCell::new(ManuallyDrop::new(native_face)),
                    coordinates: OnceLock::new(),
                },
                font_file: font_file.retain(),
            }),
        }
    }

    /// Stores the design coordinates of this face and applies them to the native handle as 16.16
    /// fixed-point values.
    ///
    /// Coordinates can only be set once. They are kept even if the engine rejects them, in which
    /// case the face stays at the engine's default instance and the rejection is returned.
    pub fn setup_coordinates(&self, coordinates: &[f32]) -> Result<(), VariationError> {
        self.inner
            .resource
            .coordinates
            .set(coordinates.to_vec())
            .map_err(|_| VariationError::AlreadyConfigured)?;

        let fixed_coordinates: Vec<_> =
            coordinates.iter().map(|&coordinate| engine::f32_to_fixed(coordinate)).collect();

        let mut lock = self.lock();
        lock.native_face().set_var_design_coordinates(&fixed_coordinates)
    }

    /// The design coordinates of this face, or `None` for the default instance.
    #[inline]
    pub fn coordinates(&self) -> Option<&[f32]> {
        self.inner.resource.coordinates.get().map(|coordinates| &coordinates[..])
    }

    /// Opens a new face at the same index of the same font file and moves it to `coordinates`.
    ///
    /// Returns `None` if the font file cannot open the face again.
    pub fn derive_variation(&self, coordinates: &[f32]) -> Option<RenderableFace> {
        let face_index = self.face_index();
        let derived_face = self.inner.font_file.create_renderable_face(face_index)?;

        if let Err(error) = derived_face.setup_coordinates(coordinates) {
            warn!("derive_variation(): coordinates {:?} not applied to face {}: {}",
                  coordinates,
                  face_index,
                  error);
        }

        debug!("derived variation {:?} of face {}", coordinates, face_index);
        Some(derived_face)
    }

    /// Acquires the global engine lock, giving access to the native handle.
    #[inline]
    pub fn lock(&self) -> FaceLock<'_> {
        FaceLock { guard: engine::lock(), resource: &self.inner.resource }
    }

    pub fn face_index(&self) -> u32 {
        self.lock().native_face().face_index()
    }

    pub fn units_per_em(&self) -> u16 {
        self.lock().native_face().units_per_em()
    }

    pub fn glyph_count(&self) -> u16 {
        self.lock().native_face().glyph_count()
    }

    /// Face-wide metrics at this face's variation coordinates.
    pub fn metrics(&self) -> Metrics {
        self.lock().native_face().metrics()
    }

    /// Copies the raw bytes of an sfnt table out of the face.
    pub fn table_data(&self, table_tag: u32) -> Option<Vec<u8>> {
        let mut lock = self.lock();
        lock.native_face().table(table_tag).map(|table| table.to_vec())
    }

    /// Reads the variation axes and named instances declared by the face.
    pub fn variations(&self) -> FontVariations {
        match self.table_data(FVAR_TABLE_TAG) {
            Some(fvar_data) => FontVariations::parse(&fvar_data),
            None => FontVariations::default(),
        }
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        !self.variations().axes.is_empty()
    }

    #[inline]
    pub fn variation_axes(&self) -> Vec<VariationAxis> {
        self.variations().axes
    }

    #[inline]
    pub fn named_instances(&self) -> Vec<NamedInstance> {
        self.variations().named_instances
    }

    /// The font file this face was opened from.
    #[inline]
    pub fn font_file(&self) -> &FontFile {
        &self.inner.font_file
    }

    #[inline]
    pub fn retain(&self) -> RenderableFace {
        self.clone()
    }

    /// Drops this reference. The face is destroyed when the last reference goes away.
    #[inline]
    pub fn release(self) {}

    #[inline]
    pub fn retain_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Returns true if both values refer to the same face.
    #[inline]
    pub fn ptr_eq(&self, other: &RenderableFace) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Drop for RenderableFaceInner {
    fn drop(&mut self) {
        debug!("destroying renderable face (coordinates {:?})", self.resource.coordinates.get());
    }
}

impl Debug for RenderableFace {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_struct("RenderableFace")
            .field("coordinates", &self.coordinates())
            .field("retain_count", &self.retain_count())
            .finish()
    }
}
