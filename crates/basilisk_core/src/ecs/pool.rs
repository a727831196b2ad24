//! # Component Pools
//!
//! A pool is dense, index-addressable storage for every instance of one
//! component type, indexed by entity id. Pools never shrink; growth
//! default-fills the new slots.
//!
//! Pools keep no per-slot occupancy flag. Whether the value at index `e` is
//! meaningful is decided entirely by entity `e`'s signature bit for this
//! component type.

use std::any::Any;

use super::component::Component;

/// Dense storage for a single component type.
///
/// # Type Parameters
///
/// * `T` - The component type to store
pub struct Pool<T: Component> {
    /// The dense array of components, indexed by entity id.
    data: Vec<T>,
}

impl<T: Component> Pool<T> {
    /// Creates an empty pool. The registry grows it before the first write.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Returns the number of slots currently allocated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks whether the pool has no slots.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Grows the pool to `new_len` slots, default-filling the new ones.
    ///
    /// Monotonic: a `new_len` at or below the current length is a no-op.
    /// Values at indices below the old length survive growth.
    pub fn grow(&mut self, new_len: usize) {
        if new_len > self.data.len() {
            self.data.resize_with(new_len, T::default);
        }
    }

    /// Gets a component by entity id.
    ///
    /// # Returns
    ///
    /// Reference to the slot, or `None` if the pool was never grown to
    /// cover `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Gets a mutable component by entity id.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Overwrites the slot at `index`.
    ///
    /// # Returns
    ///
    /// `true` if the slot was written, `false` if `index` is beyond the
    /// current length (the caller must have grown the pool first).
    #[inline]
    pub fn set(&mut self, index: usize, component: T) -> bool {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Drops every slot, returning the pool to zero length.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns a slice of all slots, for batch processing.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable slice of all slots, for batch processing.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Component> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased pool interface.
///
/// The registry stores one `Box<dyn ErasedPool>` per component-type id and
/// recovers the concrete [`Pool<T>`] by downcast. Growth must be callable
/// without knowing `T`, so it lives on the erased interface.
pub(crate) trait ErasedPool {
    /// Grows the pool to `new_len` slots (monotonic).
    fn grow(&mut self, new_len: usize);

    /// Returns the number of slots currently allocated.
    fn len(&self) -> usize;

    /// Upcast for downcasting to the concrete pool.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete pool.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedPool for Pool<T> {
    fn grow(&mut self, new_len: usize) {
        Pool::grow(self, new_len);
    }

    fn len(&self) -> usize {
        Pool::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
