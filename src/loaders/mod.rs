// face-kit/src/loaders/mod.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Font engine backends.

#[cfg(feature = "loader-ttf")]
pub use crate::loaders::ttf as default;

#[cfg(feature = "loader-ttf")]
pub mod ttf;
