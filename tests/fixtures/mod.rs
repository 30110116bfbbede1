// face-kit/tests/fixtures/mod.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Builds small sfnt fonts in memory.
//
// Every font maps 'A'..='Z' to glyphs 1..=26 and U+2764 to glyph 27, with U+2764 U+FE0F mapped to
// glyph 28. The advance of glyph `g` is `500 + 10 * g`.

#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};

pub const UNITS_PER_EM: u16 = 1000;
pub const GLYPH_COUNT: u16 = 29;

pub const ASCENT: i32 = 800;
pub const DESCENT: i32 = -200;
pub const BOUNDING_BOX: [i32; 4] = [0, DESCENT, UNITS_PER_EM as i32, ASCENT];
pub const UNDERLINE_POSITION: i32 = -100;
pub const UNDERLINE_THICKNESS: i32 = 50;

pub const HEART: char = '\u{2764}';
pub const EMOJI_PRESENTATION: char = '\u{FE0F}';
pub const HEART_GLYPH: u32 = 27;
pub const HEART_EMOJI_GLYPH: u32 = 28;

pub const WEIGHT_MIN: f32 = 100.0;
pub const WEIGHT_DEFAULT: f32 = 400.0;
pub const WEIGHT_MAX: f32 = 900.0;
pub const NAMED_WEIGHTS: [f32; 2] = [400.0, 700.0];

pub fn advance(glyph_id: u32) -> i32 {
    500 + 10 * glyph_id as i32
}

/// A single font with the tables every face needs.
pub fn font() -> Vec<u8> {
    collection_or_font(&[tables(false)], false)
}

/// A single font with a `wght` axis and two named instances.
pub fn variable_font() -> Vec<u8> {
    collection_or_font(&[tables(true)], false)
}

/// A collection holding a static and a variable face.
pub fn collection() -> Vec<u8> {
    collection_or_font(&[tables(false), tables(true)], true)
}

fn tables(variable: bool) -> Vec<([u8; 4], Vec<u8>)> {
    let mut tables = vec![
        (*b"cmap", cmap()),
        (*b"head", head()),
        (*b"hhea", hhea()),
        (*b"hmtx", hmtx()),
        (*b"maxp", maxp()),
        (*b"post", post()),
    ];
    if variable {
        tables.push((*b"fvar", fvar()));
    }
    tables
}

fn head() -> Vec<u8> {
    let mut data = vec![];
    data.write_u32::<BigEndian>(0x00010000).unwrap(); // version
    data.write_u32::<BigEndian>(0x00010000).unwrap(); // font revision
    data.write_u32::<BigEndian>(0).unwrap(); // checksum adjustment
    data.write_u32::<BigEndian>(0x5F0F3CF5).unwrap(); // magic
    data.write_u16::<BigEndian>(0).unwrap(); // flags
    data.write_u16::<BigEndian>(UNITS_PER_EM).unwrap();
    data.write_u64::<BigEndian>(0).unwrap(); // created
    data.write_u64::<BigEndian>(0).unwrap(); // modified
    for &bound in &BOUNDING_BOX {
        data.write_i16::<BigEndian>(bound as i16).unwrap();
    }
    data.write_u16::<BigEndian>(0).unwrap(); // mac style
    data.write_u16::<BigEndian>(8).unwrap(); // lowest rec ppem
    data.write_i16::<BigEndian>(2).unwrap(); // font direction hint
    data.write_i16::<BigEndian>(0).unwrap(); // index to loc format
    data.write_i16::<BigEndian>(0).unwrap(); // glyph data format
    assert_eq!(data.len(), 54);
    data
}

fn hhea() -> Vec<u8> {
    let mut data = vec![];
    data.write_u32::<BigEndian>(0x00010000).unwrap();
    data.write_i16::<BigEndian>(ASCENT as i16).unwrap();
    data.write_i16::<BigEndian>(DESCENT as i16).unwrap();
    data.write_i16::<BigEndian>(0).unwrap(); // line gap
    data.write_u16::<BigEndian>(advance(GLYPH_COUNT as u32 - 1) as u16).unwrap();
    data.extend_from_slice(&[0; 22]);
    data.write_u16::<BigEndian>(GLYPH_COUNT).unwrap(); // number of h metrics
    assert_eq!(data.len(), 36);
    data
}

fn maxp() -> Vec<u8> {
    let mut data = vec![];
    data.write_u32::<BigEndian>(0x00005000).unwrap();
    data.write_u16::<BigEndian>(GLYPH_COUNT).unwrap();
    data
}

fn post() -> Vec<u8> {
    let mut data = vec![];
    data.write_u32::<BigEndian>(0x00030000).unwrap(); // no glyph names
    data.write_i32::<BigEndian>(0).unwrap(); // italic angle
    data.write_i16::<BigEndian>(UNDERLINE_POSITION as i16).unwrap();
    data.write_i16::<BigEndian>(UNDERLINE_THICKNESS as i16).unwrap();
    data.extend_from_slice(&[0; 20]);
    assert_eq!(data.len(), 32);
    data
}

fn hmtx() -> Vec<u8> {
    let mut data = vec![];
    for glyph_id in 0..GLYPH_COUNT as u32 {
        data.write_u16::<BigEndian>(advance(glyph_id) as u16).unwrap();
        data.write_i16::<BigEndian>(0).unwrap();
    }
    data
}

fn cmap() -> Vec<u8> {
    // Format 12: segmented coverage.
    let groups = [(0x41, 0x5A, 1), (HEART as u32, HEART as u32, HEART_GLYPH)];
    let mut format_12 = vec![];
    format_12.write_u16::<BigEndian>(12).unwrap();
    format_12.write_u16::<BigEndian>(0).unwrap();
    format_12.write_u32::<BigEndian>(16 + 12 * groups.len() as u32).unwrap();
    format_12.write_u32::<BigEndian>(0).unwrap(); // language
    format_12.write_u32::<BigEndian>(groups.len() as u32).unwrap();
    for &(start, end, glyph_id) in &groups {
        format_12.write_u32::<BigEndian>(start).unwrap();
        format_12.write_u32::<BigEndian>(end).unwrap();
        format_12.write_u32::<BigEndian>(glyph_id).unwrap();
    }

    // Format 14: one non-default variation sequence.
    let mut format_14 = vec![];
    format_14.write_u16::<BigEndian>(14).unwrap();
    format_14.write_u32::<BigEndian>(10 + 11 + 4 + 5).unwrap();
    format_14.write_u32::<BigEndian>(1).unwrap();
    format_14.write_u24::<BigEndian>(EMOJI_PRESENTATION as u32).unwrap();
    format_14.write_u32::<BigEndian>(0).unwrap(); // default UVS offset
    format_14.write_u32::<BigEndian>(10 + 11).unwrap(); // non-default UVS offset
    format_14.write_u32::<BigEndian>(1).unwrap();
    format_14.write_u24::<BigEndian>(HEART as u32).unwrap();
    format_14.write_u16::<BigEndian>(HEART_EMOJI_GLYPH as u16).unwrap();

    let mut data = vec![];
    data.write_u16::<BigEndian>(0).unwrap(); // version
    data.write_u16::<BigEndian>(2).unwrap();
    let format_12_offset = 4 + 2 * 8;
    data.write_u16::<BigEndian>(0).unwrap(); // Unicode
    data.write_u16::<BigEndian>(5).unwrap(); // variation sequences
    data.write_u32::<BigEndian>(format_12_offset + format_12.len() as u32).unwrap();
    data.write_u16::<BigEndian>(3).unwrap(); // Windows
    data.write_u16::<BigEndian>(10).unwrap(); // full repertoire
    data.write_u32::<BigEndian>(format_12_offset).unwrap();
    data.extend_from_slice(&format_12);
    data.extend_from_slice(&format_14);
    data
}

fn fvar() -> Vec<u8> {
    let mut data = vec![];
    data.write_u16::<BigEndian>(1).unwrap();
    data.write_u16::<BigEndian>(0).unwrap();
    data.write_u16::<BigEndian>(16).unwrap(); // axes array offset
    data.write_u16::<BigEndian>(2).unwrap();
    data.write_u16::<BigEndian>(1).unwrap(); // axis count
    data.write_u16::<BigEndian>(20).unwrap(); // axis size
    data.write_u16::<BigEndian>(NAMED_WEIGHTS.len() as u16).unwrap();
    data.write_u16::<BigEndian>(8).unwrap(); // instance size

    data.extend_from_slice(b"wght");
    for &value in &[WEIGHT_MIN, WEIGHT_DEFAULT, WEIGHT_MAX] {
        data.write_i32::<BigEndian>(to_fixed(value)).unwrap();
    }
    data.write_u16::<BigEndian>(0).unwrap(); // flags
    data.write_u16::<BigEndian>(256).unwrap(); // axis name ID

    for (index, &weight) in NAMED_WEIGHTS.iter().enumerate() {
        data.write_u16::<BigEndian>(257 + index as u16).unwrap();
        data.write_u16::<BigEndian>(0).unwrap();
        data.write_i32::<BigEndian>(to_fixed(weight)).unwrap();
    }
    data
}

fn to_fixed(value: f32) -> i32 {
    (value * 65536.0) as i32
}

fn collection_or_font(fonts: &[Vec<([u8; 4], Vec<u8>)>], collection: bool) -> Vec<u8> {
    let header_len = if collection { 12 + 4 * fonts.len() } else { 0 };
    let directory_lens: Vec<usize> = fonts.iter().map(|tables| 12 + 16 * tables.len()).collect();
    let data_start = header_len + directory_lens.iter().sum::<usize>();

    let mut out = vec![];
    if collection {
        out.extend_from_slice(b"ttcf");
        out.write_u32::<BigEndian>(0x00010000).unwrap();
        out.write_u32::<BigEndian>(fonts.len() as u32).unwrap();
        let mut directory_offset = header_len;
        for directory_len in &directory_lens {
            out.write_u32::<BigEndian>(directory_offset as u32).unwrap();
            directory_offset += directory_len;
        }
    }

    let mut table_data = vec![];
    for tables in fonts {
        let mut tables = tables.clone();
        tables.sort_by_key(|&(tag, _)| tag);

        out.write_u32::<BigEndian>(0x00010000).unwrap();
        out.write_u16::<BigEndian>(tables.len() as u16).unwrap();
        out.write_u16::<BigEndian>(0).unwrap(); // search range
        out.write_u16::<BigEndian>(0).unwrap(); // entry selector
        out.write_u16::<BigEndian>(0).unwrap(); // range shift
        for (tag, data) in &tables {
            out.extend_from_slice(tag);
            out.write_u32::<BigEndian>(0).unwrap(); // checksum
            out.write_u32::<BigEndian>((data_start + table_data.len()) as u32).unwrap();
            out.write_u32::<BigEndian>(data.len() as u32).unwrap();
            table_data.extend_from_slice(data);
            while table_data.len() % 4 != 0 {
                table_data.push(0);
            }
        }
    }

    assert_eq!(out.len(), data_start);
    out.extend_from_slice(&table_data);
    out
}
