// face-kit/src/file_type.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The type of a font file: either a single face or a TrueType/OpenType collection.

/// The type of a font file: either a single face or a TrueType/OpenType collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    /// The font file holds a single face (`.ttf`, `.otf`, etc.)
    Single,
    /// The font file holds a collection of faces (`.ttc`, `.otc`, etc.)
    Collection(u32),
}

impl FileType {
    /// The number of faces that can be opened from the file.
    #[inline]
    pub fn face_count(self) -> u32 {
        match self {
            FileType::Single => 1,
            FileType::Collection(count) => count,
        }
    }
}
