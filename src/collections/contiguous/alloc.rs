use std::alloc::{self, Layout};
use std::ptr::NonNull;

use derive_more::{Display, Error};

/// Indicates that an allocator was unable to provide the requested memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Memory allocation failed!")]
pub struct AllocError;

/// The allocator interface used by [`List`](super::List).
///
/// # Safety
/// Implementors must return blocks that are valid for the requested layout and remain valid until
/// they are deallocated or successfully resized. A failed [`grow`](RawAlloc::grow) or
/// [`shrink`](RawAlloc::shrink) must leave the original block valid and untouched.
pub unsafe trait RawAlloc {
    /// Allocates a block of memory for a layout with a non-zero size.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Deallocates a block of memory.
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with `layout`.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Moves the block at `ptr` to a larger layout, preserving its contents.
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with `old_layout`, and `new_layout` must
    /// have the same alignment and a size no smaller than `old_layout`.
    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        let new = self.allocate(new_layout)?;
        // SAFETY: Both blocks are valid for old_layout.size() bytes and belong to different
        // allocations.
        unsafe {
            new.copy_from_nonoverlapping(ptr, old_layout.size());
            self.deallocate(ptr, old_layout);
        }
        Ok(new)
    }

    /// Moves the block at `ptr` to a smaller layout, preserving the contents that still fit.
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with `old_layout`, and `new_layout` must
    /// have the same alignment and a non-zero size no larger than `old_layout`.
    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        let new = self.allocate(new_layout)?;
        // SAFETY: Both blocks are valid for new_layout.size() bytes and belong to different
        // allocations.
        unsafe {
            new.copy_from_nonoverlapping(ptr, new_layout.size());
            self.deallocate(ptr, old_layout);
        }
        Ok(new)
    }
}

// SAFETY: All calls are forwarded to A, which upholds the contract itself.
unsafe impl<A: RawAlloc> RawAlloc for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarded with the caller's guarantees.
        unsafe { (**self).deallocate(ptr, layout) }
    }

    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: Forwarded with the caller's guarantees.
        unsafe { (**self).grow(ptr, old_layout, new_layout) }
    }

    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: Forwarded with the caller's guarantees.
        unsafe { (**self).shrink(ptr, old_layout, new_layout) }
    }
}

/// The global allocator, used by default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

// SAFETY: std::alloc::realloc leaves the original block valid when it returns null.
unsafe impl RawAlloc for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: Callers only request layouts with a non-zero size.
        NonNull::new(unsafe { alloc::alloc(layout) }).ok_or(AllocError)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: ptr was allocated in the global allocator with layout.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }

    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: ptr was allocated with old_layout and the new size is non-zero and has already
        // been validated as a Layout.
        NonNull::new(unsafe { alloc::realloc(ptr.as_ptr(), old_layout, new_layout.size()) })
            .ok_or(AllocError)
    }

    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: As above.
        NonNull::new(unsafe { alloc::realloc(ptr.as_ptr(), old_layout, new_layout.size()) })
            .ok_or(AllocError)
    }
}
