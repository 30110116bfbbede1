// face-kit/src/error.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `face-kit` can return.
//!
//! Lookup misses inside shaping callbacks are not errors; they are reported through the shaping
//! engine's own "not found" convention.

use std::io;
use thiserror::Error;

/// Reasons why a font file or one of its faces might fail to load.
#[derive(Debug, Error)]
pub enum FontLoadingError {
    /// The data was of a format the loader didn't recognize.
    #[error("unknown format")]
    UnknownFormat,

    /// Attempted to load an invalid index in a TrueType or OpenType font collection.
    ///
    /// For example, if a `.ttc` file has 2 fonts in it, and you ask for the 5th one, you'll get
    /// this error.
    #[error("no such font in the collection")]
    NoSuchFontInCollection,

    /// Attempted to load a malformed or corrupted font.
    #[error("parse error")]
    Parse,

    /// A disk or similar I/O error occurred while attempting to load the font.
    #[error("I/O error")]
    Io(#[from] io::Error),
}

/// Reasons why design-space coordinates might not be applied to a face.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum VariationError {
    /// The face has no variation axes.
    #[error("the face is not variable")]
    NotVariable,

    /// More coordinates were supplied than the face has axes.
    #[error("{supplied} coordinates supplied for {axes} variation axes")]
    TooManyCoordinates {
        /// The number of coordinates that were supplied.
        supplied: usize,
        /// The number of axes the face declares.
        axes: usize,
    },

    /// The coordinates of this face were already set up; they are immutable afterwards.
    #[error("variation coordinates were already set up")]
    AlreadyConfigured,
}
