use std::iter::FusedIterator;
use std::ptr::{self, NonNull};

use super::{Global, List, RawAlloc};

/// An owned iterator over the elements of a [`List`]. See [`List::into_iter`].
pub struct IntoIter<T, A: RawAlloc = Global> {
    // The List keeps ownership of the allocation, but with a length of zero so that it never drops
    // any elements itself. Elements in start..end are still initialized.
    pub(crate) list: List<T, A>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T, A: RawAlloc> IntoIter<T, A> {
    pub(crate) fn new(mut list: List<T, A>) -> IntoIter<T, A> {
        let end = list.len;
        list.len = 0;
        IntoIter {
            list,
            start: 0,
            end,
        }
    }

    /// Returns a pointer to the element at `index`.
    ///
    /// # Safety
    /// `index` must be less than the original length of the List.
    unsafe fn slot(&self, index: usize) -> NonNull<T> {
        // SAFETY: A List with a non-zero length always holds storage, and the caller guarantees
        // the offset is in bounds.
        unsafe { self.list.ptr.unwrap_unchecked().add(index) }
    }
}

impl<T, A: RawAlloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        // SAFETY: start < end, so the element is initialized. Incrementing start afterwards moves
        // it out of the iterator's responsibility.
        let value = unsafe { self.slot(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, A: RawAlloc> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        // SAFETY: The newly decremented end is still >= start, so the element is initialized.
        Some(unsafe { self.slot(self.end).read() })
    }
}

impl<T, A: RawAlloc> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: RawAlloc> FusedIterator for IntoIter<T, A> {}

impl<T, A: RawAlloc> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        for i in self.start..self.end {
            // SAFETY: Every element in start..end is initialized and hasn't been read out.
            unsafe { ptr::drop_in_place(self.slot(i).as_ptr()) };
        }
        // The List itself now only deallocates.
    }
}
