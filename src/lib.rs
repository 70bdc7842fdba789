//! static_mph_dispatch — compile-time-keyed minimal perfect hashing and a
//! static polymorphic dispatch facility built on top of it.
//!
//! Given a fixed set of integer (or enum) keys, [`Mph`] maps each key to its
//! dense index in `[0, N)` in O(1), using either a direct lookup table
//! ([`Llut`]) or a two-level FKS table ([`Fks`]), chosen by a memory
//! heuristic. [`key_set!`] binds a key set to a process-wide singleton;
//! [`dispatch_factory!`] uses that singleton to construct one of several
//! pre-registered derived types into a statically allocated,
//! type-exclusive [`StorageCell`], selected by key at run time.
//!
//! ```
//! use static_mph_dispatch::key_set;
//!
//! key_set!(Ids: u8 = [2, 5, 7]);
//!
//! let mph = Ids::mph();
//! assert_eq!(mph.lookup(5), 1);
//! assert_eq!(mph.lookup(9), mph.sentinel());
//! ```

mod bits;
mod cell;
mod distinct;
pub mod dispatch;
mod error;
mod fks;
mod key;
mod llut;
mod mph;
mod util;

pub use bits::{
    bit_width, bucket_of, ceil_log2, ceil_pow2, ceil_pow2_saturating, mix8, mix16, mix32, mix64, mix_native, top_bits,
};
pub use cell::{HasCell, StorageCell};
pub use dispatch::{ConstructFrom, Keyed};
pub use error::MphError;
pub use fks::Fks;
pub use key::Key;
pub use llut::Llut;
pub use mph::Mph;
