// face-kit/src/variation.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Variation axes and named instances, read from the raw `fvar` table of a face.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{self, Cursor};

use crate::engine::{self, make_tag};

pub const FVAR_TABLE_TAG: u32 = make_tag(b"fvar");

const AXIS_RECORD_SIZE: u16 = 20;
const AXIS_FLAG_HIDDEN: u16 = 0x0001;

/// One axis of a face's design space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariationAxis {
    /// The axis tag, such as `wght`.
    pub tag: u32,
    pub min_value: f32,
    pub default_value: f32,
    pub max_value: f32,
    /// Whether the axis should be hidden from user interfaces.
    pub hidden: bool,
    /// The `name` table entry that holds the axis name.
    pub name_id: u16,
}

/// A named point in a face's design space, such as "Bold" or "Condensed Light".
#[derive(Clone, Debug, PartialEq)]
pub struct NamedInstance {
    /// The `name` table entry that holds the style name.
    pub subfamily_name_id: u16,
    /// The `name` table entry that holds the PostScript name, if the font declares one.
    pub postscript_name_id: Option<u16>,
    /// Design coordinates, one per axis.
    pub coordinates: Vec<f32>,
}

/// The parsed contents of an `fvar` table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontVariations {
    pub axes: Vec<VariationAxis>,
    pub named_instances: Vec<NamedInstance>,
}

impl FontVariations {
    /// Parses an `fvar` table. Malformed or truncated data yields no axes and no instances.
    pub fn parse(fvar_data: &[u8]) -> FontVariations {
        parse_fvar(fvar_data).unwrap_or_default()
    }
}

fn parse_fvar(data: &[u8]) -> io::Result<FontVariations> {
    let mut reader = Cursor::new(data);
    let major_version = reader.read_u16::<BigEndian>()?;
    let _minor_version = reader.read_u16::<BigEndian>()?;
    let axes_offset = reader.read_u16::<BigEndian>()?;
    let _reserved = reader.read_u16::<BigEndian>()?;
    let axis_count = reader.read_u16::<BigEndian>()?;
    let axis_size = reader.read_u16::<BigEndian>()?;
    let instance_count = reader.read_u16::<BigEndian>()?;
    let instance_size = reader.read_u16::<BigEndian>()?;

    if major_version != 1 || axis_size != AXIS_RECORD_SIZE {
        return Ok(FontVariations::default())
    }

    reader.set_position(axes_offset as u64);
    let mut axes = Vec::with_capacity(axis_count as usize);
    for _ in 0..axis_count {
        let tag = reader.read_u32::<BigEndian>()?;
        let min_value = read_fixed(&mut reader)?;
        let default_value = read_fixed(&mut reader)?;
        let max_value = read_fixed(&mut reader)?;
        let flags = reader.read_u16::<BigEndian>()?;
        let name_id = reader.read_u16::<BigEndian>()?;
        axes.push(VariationAxis {
            tag,
            min_value,
            default_value,
            max_value,
            hidden: (flags & AXIS_FLAG_HIDDEN) != 0,
            name_id,
        });
    }

    // An instance record is a name ID, flags and one coordinate per axis, optionally followed by
    // a PostScript name ID.
    let coordinates_size = axis_count as u64 * 4;
    let instance_size = instance_size as u64;
    if instance_size != coordinates_size + 4 && instance_size != coordinates_size + 6 {
        return Ok(FontVariations::default())
    }
    let has_postscript_name = instance_size == coordinates_size + 6;
    let instances_offset = axes_offset as u64 + axis_count as u64 * AXIS_RECORD_SIZE as u64;

    let mut named_instances = Vec::with_capacity(instance_count as usize);
    for instance_index in 0..instance_count as u64 {
        reader.set_position(instances_offset + instance_index * instance_size);
        let subfamily_name_id = reader.read_u16::<BigEndian>()?;
        let _flags = reader.read_u16::<BigEndian>()?;
        let mut coordinates = Vec::with_capacity(axis_count as usize);
        for _ in 0..axis_count {
            coordinates.push(read_fixed(&mut reader)?);
        }
        let postscript_name_id = if has_postscript_name {
            match reader.read_u16::<BigEndian>()? {
                0xffff => None,
                name_id => Some(name_id),
            }
        } else {
            None
        };
        named_instances.push(NamedInstance { subfamily_name_id, postscript_name_id, coordinates });
    }

    Ok(FontVariations { axes, named_instances })
}

fn read_fixed(reader: &mut Cursor<&[u8]>) -> io::Result<f32> {
    reader.read_i32::<BigEndian>().map(engine::fixed_to_f32)
}
