//! Static storage cell: a per-type, singleton, aligned buffer with explicit
//! construct/replace/destroy lifecycle.
//!
//! A process-wide `static` holding a raw, uninitialized buffer behind a
//! marker type, generalized from a free-list allocator down to a
//! single-slot, single-type cell with an explicit liveness flag instead of a
//! free/used bitmap.

use std::cell::{Cell, UnsafeCell};
use std::mem::MaybeUninit;

/// A process-wide, single-occupancy buffer for `T`. Storage cells are
/// single-owner, single-reader structures with no built-in thread safety —
/// `unsafe impl Sync` exists only so a `StorageCell` can live in a `static`;
/// callers are responsible for not accessing it concurrently.
pub struct StorageCell<T> {
    slot: UnsafeCell<MaybeUninit<T>>,
    live: Cell<bool>,
}

unsafe impl<T> Sync for StorageCell<T> {}

impl<T> StorageCell<T> {
    pub const fn new() -> Self {
        Self { slot: UnsafeCell::new(MaybeUninit::uninit()), live: Cell::new(false) }
    }

    /// Constructs `value` into the cell. Precondition: the cell must not
    /// already be live — violating that is a bug at the call site, not a
    /// recoverable error.
    pub fn construct(&'static self, value: T) -> &'static mut T {
        assert!(!self.live.get(), "StorageCell::construct called on a live cell");
        unsafe {
            (*self.slot.get()).write(value);
            self.live.set(true);
            (*self.slot.get()).assume_init_mut()
        }
    }

    /// Destroys the current occupant (if any) before constructing `value`.
    pub fn replace(&'static self, value: T) -> &'static mut T {
        self.destroy();
        self.construct(value)
    }

    /// Drops the current occupant, if live. A no-op if the cell is already
    /// empty.
    pub fn destroy(&self) {
        if self.live.get() {
            unsafe {
                (*self.slot.get()).assume_init_drop();
            }
            self.live.set(false);
        }
    }

    /// Returns a reference to the current occupant, if live.
    pub fn get(&self) -> Option<&T> {
        if self.live.get() { Some(unsafe { (*self.slot.get()).assume_init_ref() }) } else { None }
    }

    /// Returns a mutable reference to the current occupant, if live.
    pub fn get_mut(&'static self) -> Option<&'static mut T> {
        if self.live.get() { Some(unsafe { (*self.slot.get()).assume_init_mut() }) } else { None }
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }
}

impl<T> Default for StorageCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds a type to its process-wide [`StorageCell`]. Implemented once per
/// type, typically by [`crate::storage_cell!`] or inline by
/// [`crate::dispatch_factory!`].
pub trait HasCell: Sized + 'static {
    fn cell() -> &'static StorageCell<Self>;
}

/// Declares `$ty`'s process-wide [`StorageCell`] and its [`HasCell`] impl.
#[macro_export]
macro_rules! storage_cell {
    ($ty:ty) => {
        impl $crate::HasCell for $ty {
            fn cell() -> &'static $crate::StorageCell<Self> {
                static CELL: $crate::StorageCell<$ty> = $crate::StorageCell::new();
                &CELL
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;
    static DROPS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);
    impl Drop for Counter {
        fn drop(&mut self) {
            DROPS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    static CELL: StorageCell<Counter> = StorageCell::new();

    #[test]
    fn construct_get_destroy_lifecycle() {
        assert!(CELL.get().is_none());
        CELL.construct(Counter);
        assert!(CELL.get().is_some());
        CELL.destroy();
        assert!(CELL.get().is_none());
    }

    #[test]
    fn replace_runs_exactly_one_destructor_per_prior_occupant() {
        static CELL2: StorageCell<Counter> = StorageCell::new();
        let before = DROPS.load(std::sync::atomic::Ordering::SeqCst);
        CELL2.construct(Counter);
        CELL2.replace(Counter);
        CELL2.replace(Counter);
        CELL2.replace(Counter);
        let after_replacements = DROPS.load(std::sync::atomic::Ordering::SeqCst);
        assert_eq!(after_replacements - before, 3);
        CELL2.destroy();
        assert_eq!(DROPS.load(std::sync::atomic::Ordering::SeqCst) - before, 4);
    }

    #[test]
    #[should_panic(expected = "construct called on a live cell")]
    fn construct_on_live_cell_panics() {
        static CELL3: StorageCell<u32> = StorageCell::new();
        CELL3.construct(1);
        CELL3.construct(2);
    }
}
