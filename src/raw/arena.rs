use alloc::vec::Vec;

use super::handle::Handle;

#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns a mutable reference to an element by handle from a raw slot pointer.
    ///
    /// # Safety
    /// - `base` must come from [`Arena::as_mut_ptr`] on an arena that is still alive and has
    ///   not been structurally modified since.
    /// - No other reference to the element at `handle` may exist for `'a`.
    #[inline]
    pub(crate) unsafe fn get_mut_ptr<'a>(base: *mut Option<T>, handle: Handle) -> &'a mut T {
        // SAFETY: Caller guarantees `base` is valid and that this slot is not aliased.
        unsafe { (*base.add(handle.to_index())).as_mut().expect("`Arena::get_mut_ptr()` - `handle` is invalid!") }
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut Option<T> {
        self.slots.as_mut_ptr()
    }

    /// Exchanges the elements stored at `a` and `b`.
    pub(crate) fn swap(&mut self, a: Handle, b: Handle) {
        self.slots.swap(a.to_index(), b.to_index());
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
