use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::rc::Rc;

use crate::collections::contiguous::{AllocError, Global, RawAlloc};

/// A type without size, for checking that collections never allocate for it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

/// A value which increments a shared counter when dropped.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    /// Creates a new counter starting at `value`.
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// An allocator wrapping [`Global`], which counts every allocation or reallocation and can be told
/// to start failing.
#[derive(Debug, Default)]
pub struct TestAlloc {
    /// The number of successful calls to allocate, grow or shrink.
    pub calls: Cell<usize>,
    /// The number of calls which may still succeed, unlimited if None.
    pub budget: Cell<Option<usize>>,
}

impl TestAlloc {
    /// Creates an allocator that never fails.
    pub fn new() -> TestAlloc {
        TestAlloc::default()
    }

    /// Creates an allocator that fails after `budget` successful calls.
    pub fn failing_after(budget: usize) -> TestAlloc {
        TestAlloc {
            calls: Cell::new(0),
            budget: Cell::new(Some(budget)),
        }
    }

    fn spend(&self) -> Result<(), AllocError> {
        match self.budget.get() {
            Some(0) => return Err(AllocError),
            Some(budget) => self.budget.set(Some(budget - 1)),
            None => {},
        }
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

// SAFETY: Every successful call is forwarded to Global, and failures never touch the original
// block.
unsafe impl RawAlloc for TestAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.spend()?;
        Global.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarded with the caller's guarantees.
        unsafe { Global.deallocate(ptr, layout) }
    }

    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        self.spend()?;
        // SAFETY: Forwarded with the caller's guarantees.
        unsafe { Global.grow(ptr, old_layout, new_layout) }
    }

    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        self.spend()?;
        // SAFETY: Forwarded with the caller's guarantees.
        unsafe { Global.shrink(ptr, old_layout, new_layout) }
    }
}
