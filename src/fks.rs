//! Two-level FKS table: first-level bucketing, per-bucket multiply-shift
//! second-level hashing with no collisions.
//!
//! Each bucket's items are placed by searching increasing odd multipliers
//! (`mix_native(attempt) | 1`) until one maps every item in the bucket to a
//! distinct slot within that bucket's `2^rbits` window — "distinct top bits
//! within the bucket" rather than "free in a shared occupancy bitmap", which
//! keeps each bucket's placement independent of every other bucket's.

use crate::bits::{bucket_of, ceil_log2, ceil_pow2, mix_native, top_bits};
use crate::distinct::all_distinct;
use crate::error::MphError;
use crate::key::Key;

#[derive(Debug)]
pub struct Fks<K: Key> {
    m: u32,
    rbits: Vec<u32>,
    mult: Vec<u64>,
    base: Vec<u32>,
    slot_to_index: Vec<u32>,
    keys_by_index: Vec<K>,
    n: u32,
}

impl<K: Key> Fks<K> {
    pub fn try_build(keys: &[K]) -> Result<Self, MphError> {
        if keys.is_empty() {
            return Err(MphError::EmptyKeySet);
        }
        if !all_distinct(keys) {
            return Err(MphError::DuplicateKey);
        }
        let n = keys.len();
        let n_u32 = n as u32;
        let m = ceil_pow2(n as u64) as u32;

        // 1) bucket assignment, in declaration order.
        let mut bucket_items: Vec<Vec<(u64, u32)>> = vec![Vec::new(); m as usize];
        for (i, &k) in keys.iter().enumerate() {
            let kv = k.to_u64();
            let b = bucket_of(mix_native(kv), m as u64);
            bucket_items[b].push((kv, i as u32));
        }

        // 2)+3) per-bucket second-level width and flat layout.
        let mut rbits = vec![0u32; m as usize];
        let mut base = vec![0u32; m as usize];
        let mut offset: u32 = 0;
        for b in 0..m as usize {
            let s_b = bucket_items[b].len() as u64;
            rbits[b] = if s_b <= 1 { 0 } else { ceil_log2(s_b * s_b) };
            base[b] = offset;
            offset += 1u32 << rbits[b];
        }

        // 4) flat slot/membership arrays.
        let mut slot_to_index = vec![n_u32; offset as usize];
        let mut mult = vec![1u64; m as usize];

        // 5)+6) per-bucket multiplier search and commit.
        for b in 0..m as usize {
            let items = &bucket_items[b];
            if items.is_empty() {
                continue;
            }
            let cap = 1u32 << rbits[b];
            let max_attempts = 1u32 << (rbits[b] + 4);
            let mut stamp = vec![0u32; cap as usize];
            let mut cur_stamp: u32 = 0;
            let mut accepted: Option<(u64, Vec<(usize, u32)>)> = None;

            for attempt in 1..=max_attempts {
                let a = mix_native(attempt as u64) | 1;
                cur_stamp += 1;
                let mut positions = Vec::with_capacity(items.len());
                let mut ok = true;
                for &(kv, idx) in items {
                    let local = top_bits(mix_native(kv).wrapping_mul(a), rbits[b]) as usize;
                    if stamp[local] == cur_stamp {
                        ok = false;
                        break;
                    }
                    stamp[local] = cur_stamp;
                    positions.push((local, idx));
                }
                if ok {
                    accepted = Some((a, positions));
                    break;
                }
            }

            match accepted {
                Some((a, positions)) => {
                    mult[b] = a;
                    for (local, idx) in positions {
                        slot_to_index[base[b] as usize + local] = idx;
                    }
                }
                None => {
                    return Err(MphError::BucketSearchExhausted { bucket: b, attempts: max_attempts });
                }
            }
        }

        Ok(Self {
            m,
            rbits,
            mult,
            base,
            slot_to_index,
            keys_by_index: keys.to_vec(),
            n: n_u32,
        })
    }

    pub fn build(keys: &[K]) -> Self {
        Self::try_build(keys).expect("Fks::build: invalid key set")
    }

    /// Returns the dense index of `key`, or [`Self::sentinel`] if absent.
    /// The final equality check against `keys_by_index` is mandatory: a
    /// non-registered key may hash into an occupied slot of a foreign bucket.
    #[inline]
    pub fn lookup(&self, key: K) -> u32 {
        let kv = key.to_u64();
        let mx = mix_native(kv);
        let b = bucket_of(mx, self.m as u64);
        let pos = self.base[b] as usize + top_bits(mx.wrapping_mul(self.mult[b]), self.rbits[b]) as usize;
        let i = self.slot_to_index[pos];
        if i == self.n || self.keys_by_index[i as usize].to_u64() != kv {
            return self.n;
        }
        i
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.n
    }

    #[inline]
    pub fn sentinel(&self) -> u32 {
        self.n
    }

    #[inline]
    pub fn buckets(&self) -> u32 {
        self.m
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.slot_to_index.len()
    }
}
