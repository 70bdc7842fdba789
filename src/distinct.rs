//! Compile-time (well: build-once) duplicate detection over a key array.
//!
//! For keys whose representation has `<= 16` value bits, use a bitmap
//! indexed by key value; otherwise an open-addressed set sized
//! `ceil_pow2(max(1, 2N))` with linear probing seeded by `mix_native`. Both
//! paths avoid pulling in a general-purpose hashing/allocator dependency
//! for what is otherwise a single build-time pass (see DESIGN.md).

use crate::bits::{ceil_pow2, mix_native};
use crate::key::Key;

/// Returns `true` iff every key in `keys` is pairwise distinct.
pub fn all_distinct<K: Key>(keys: &[K]) -> bool {
    if K::BITS <= 16 {
        all_distinct_bitmap(keys)
    } else {
        all_distinct_probed(keys)
    }
}

fn all_distinct_bitmap<K: Key>(keys: &[K]) -> bool {
    let span = 1usize << K::BITS;
    let mut seen = crate::util::BitSet::new(span);
    for &k in keys {
        let v = k.to_u64() as usize;
        if seen.test(v) {
            return false;
        }
        seen.set(v);
    }
    true
}

fn all_distinct_probed<K: Key>(keys: &[K]) -> bool {
    let cap = ceil_pow2((keys.len().max(1) as u64) * 2) as usize;
    let mask = (cap - 1) as u64;
    let mut slots: Vec<Option<u64>> = vec![None; cap];
    for &k in keys {
        let v = k.to_u64();
        let mut idx = (mix_native(v) & mask) as usize;
        loop {
            match slots[idx] {
                None => {
                    slots[idx] = Some(v);
                    break;
                }
                Some(existing) if existing == v => return false,
                _ => idx = (idx + 1) & mask as usize,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_path_detects_dup() {
        let keys: [u8; 4] = [2, 5, 7, 5];
        assert!(!all_distinct(&keys));
        let keys: [u8; 3] = [2, 5, 7];
        assert!(all_distinct(&keys));
    }

    #[test]
    fn probed_path_detects_dup() {
        let keys: [u32; 4] = [2, 500_000, 7, 500_000];
        assert!(!all_distinct(&keys));
        let keys: [u32; 3] = [2, 500_000, 7];
        assert!(all_distinct(&keys));
    }

    #[test]
    fn probed_path_large_sparse_set() {
        let keys: Vec<u32> = (0..2048u32).map(|i| (25173u64 * i as u64 + 13849) as u32 % 65536).collect();
        assert!(all_distinct(&keys));
    }
}
