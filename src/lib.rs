// face-kit/src/lib.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `face-kit` sits between a font engine and a text shaping engine.
//!
//! A [`FontFile`] opens [`RenderableFace`]s, each of which owns one native font-engine face at
//! one point of the font's variation space. A [`ShapableFace`] wraps a renderable face so that
//! the shaping engine can query glyphs and advances from it. Derived variations of a shapable
//! face share the parsed font tables of their root while answering queries from their own
//! variation instance.
//!
//! The font engine is not thread-safe, so every access to a native face goes through one global
//! lock; see the [`engine`] module.

#[macro_use]
extern crate lazy_static;

pub mod advance_cache;
pub mod engine;
pub mod error;
pub mod file_type;
pub mod font_file;
#[cfg(feature = "loader-ttf")]
pub mod handle;
pub mod loader;
pub mod loaders;
pub mod renderable_face;
pub mod shapable_face;
pub mod shaping;
pub mod variation;


pub use crate::error::{FontLoadingError, VariationError};
pub use crate::font_file::FontFile;
pub use crate::loader::Metrics;
pub use crate::renderable_face::RenderableFace;
pub use crate::shapable_face::ShapableFace;
