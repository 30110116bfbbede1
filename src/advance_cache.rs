// face-kit/src/advance_cache.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A small fixed-capacity cache of unscaled glyph advances.

/// A direct-mapped cache from glyph ID to horizontal advance.
///
/// The cache has `CAPACITY` slots and glyph `g` always lives in slot `g % CAPACITY`. Storing a
/// glyph evicts whichever glyph occupied its slot before. A lookup only ever answers for the exact
/// glyph ID held in the slot, so an evicted neighbour can never be returned in its place.
///
/// Advances only change with the variation coordinates, and every variation instance gets its own
/// cache, so cached values never go stale.
#[derive(Clone)]
pub struct AdvanceCache {
    slots: [Option<Entry>; AdvanceCache::CAPACITY],
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    glyph_id: u16,
    advance: i32,
}

impl AdvanceCache {
    /// The number of slots. A power of two, so the slot index is a mask.
    pub const CAPACITY: usize = 256;

    #[inline]
    pub fn new() -> AdvanceCache {
        AdvanceCache { slots: [None; AdvanceCache::CAPACITY] }
    }

    #[inline]
    pub fn get(&self, glyph_id: u16) -> Option<i32> {
        match self.slots[slot_index(glyph_id)] {
            Some(entry) if entry.glyph_id == glyph_id => Some(entry.advance),
            _ => None,
        }
    }

    #[inline]
    pub fn put(&mut self, glyph_id: u16, advance: i32) {
        self.slots[slot_index(glyph_id)] = Some(Entry { glyph_id, advance });
    }

    /// The number of glyphs currently cached.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AdvanceCache {
    #[inline]
    fn default() -> AdvanceCache {
        AdvanceCache::new()
    }
}

#[inline]
fn slot_index(glyph_id: u16) -> usize {
    glyph_id as usize & (AdvanceCache::CAPACITY - 1)
}

#[cfg(test)]
mod tests {
    use super::AdvanceCache;

    #[test]
    fn get_returns_stored_advance() {
        let mut cache = AdvanceCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(42), None);

        cache.put(42, 615);
        cache.put(7, -20);
        assert_eq!(cache.get(42), Some(615));
        assert_eq!(cache.get(7), Some(-20));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn put_overwrites_same_glyph() {
        let mut cache = AdvanceCache::new();
        cache.put(3, 100);
        cache.put(3, 120);
        assert_eq!(cache.get(3), Some(120));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn colliding_glyph_evicts_slot() {
        let capacity = AdvanceCache::CAPACITY as u16;
        let mut cache = AdvanceCache::new();
        cache.put(5, 500);
        cache.put(5 + capacity, 900);

        // The evicted glyph misses instead of answering with its neighbour's advance.
        assert_eq!(cache.get(5), None);
        assert_eq!(cache.get(5 + capacity), Some(900));
        assert_eq!(cache.get(5 + 2 * capacity), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn capacity_bounds_entries() {
        let mut cache = AdvanceCache::new();
        for glyph_id in 0..u16::max_value() {
            cache.put(glyph_id, glyph_id as i32);
        }
        assert_eq!(cache.len(), AdvanceCache::CAPACITY);
        assert_eq!(cache.get(u16::max_value() - 1), Some(u16::max_value() as i32 - 1));
        assert_eq!(cache.get(0), None);
    }
}
