//! MPH selector: chooses the direct table or the two-level FKS table by a
//! compile-time memory heuristic, and exposes the canonical per-key-set
//! singleton.

use crate::bits::index_width_bytes;
use crate::error::MphError;
use crate::fks::Fks;
use crate::key::Key;
use crate::llut::Llut;

/// A minimal perfect hash over `K`, backed by either [`Llut`] or [`Fks`].
#[derive(Debug)]
pub enum Mph<K: Key> {
    Direct(Llut<K>),
    TwoLevel(Fks<K>),
}

impl<K: Key> Mph<K> {
    /// Picks FKS when its estimated footprint beats a direct table's,
    /// otherwise LLUT: `mem_llut = span * index_width`,
    /// `mem_fks = n * (alpha * index_width + 2*word_size + 1 + sizeof(K))`.
    pub fn try_build(keys: &[K]) -> Result<Self, MphError> {
        if keys.is_empty() {
            return Err(MphError::EmptyKeySet);
        }
        let n = keys.len() as u64;
        let span = keys.iter().map(|k| k.to_u64()).max().unwrap() + 1;
        // The direct table's own cell width (see `Llut`'s `Cells` layout) —
        // kept in lockstep via the same `index_width_bytes` helper so this
        // estimate never diverges from what `Llut::try_build` actually builds.
        let index_width = index_width_bytes(n);
        let word = (usize::BITS / 8) as u64;
        const ALPHA: u64 = 3;

        let mem_llut = span * index_width;
        let mem_fks = n * (ALPHA * index_width + 2 * word + 1 + (K::BITS as u64 / 8).max(1));

        if mem_llut > mem_fks {
            Ok(Mph::TwoLevel(Fks::try_build(keys)?))
        } else {
            Ok(Mph::Direct(Llut::try_build(keys)?))
        }
    }

    pub fn build(keys: &[K]) -> Self {
        Self::try_build(keys).expect("Mph::build: invalid key set")
    }

    #[inline]
    pub fn lookup(&self, key: K) -> u32 {
        match self {
            Mph::Direct(t) => t.lookup(key),
            Mph::TwoLevel(t) => t.lookup(key),
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        match self {
            Mph::Direct(t) => t.size(),
            Mph::TwoLevel(t) => t.size(),
        }
    }

    #[inline]
    pub fn sentinel(&self) -> u32 {
        self.size()
    }
}

/// Declares a fixed `(KeyType, Keys…)` set as a marker type exposing the
/// process-wide canonical [`Mph`] singleton for that exact key set. Every
/// call returns the same object; identity is stable for the life of the
/// process, backed by `std::sync::OnceLock` for lazy initialization on
/// first use.
#[macro_export]
macro_rules! key_set {
    ($vis:vis $name:ident : $key_ty:ty = [ $( $k:expr ),+ $(,)? ]) => {
        $vis struct $name;

        impl $name {
            pub const KEYS: &'static [$key_ty] = &[ $( $k ),+ ];

            pub fn mph() -> &'static $crate::Mph<$key_ty> {
                static CELL: ::std::sync::OnceLock<$crate::Mph<$key_ty>> = ::std::sync::OnceLock::new();
                CELL.get_or_init(|| $crate::Mph::build($name::KEYS))
            }
        }
    };
}
