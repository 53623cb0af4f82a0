use std::alloc::Layout;
use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use super::{Global, IndexOutOfBounds, IntoIter, RawAlloc};
use crate::exception::{Outcome, Thrown, checked_add, checked_mul};
use crate::status::StatusCode;
use crate::util::result::ResultExtension;

/// The smallest capacity a List will allocate when it grows.
pub const MIN_CAPACITY: usize = 8;

const GROWTH_FACTOR: usize = 2;

/// A growable contiguous collection with amortized `O(1)` pushes.
///
/// A new List holds no allocation at all. This absent state is a valid, empty List with a capacity
/// of zero: every read-only method answers for it without touching memory, and the first growth
/// allocates fresh storage.
///
/// Growth always goes through the `try_*` methods, which report failure as a [`Thrown`] value and
/// leave the List exactly as it was. The plain methods are thin wrappers that panic instead.
///
/// Indices are [`isize`], where a negative index counts back from the end, so `-1` refers to the
/// last element.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the List.
/// - `k`: The number of items being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `grow_with` | `O(k)`*, `O(n+k)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
///
/// \* If the List doesn't have enough capacity, the elements are moved to a new allocation at least
/// twice the size of the old one.
///
/// \** If the List already has the requested capacity, `reserve` is `O(1)`.
pub struct List<T, A: RawAlloc = Global> {
    pub(crate) ptr: Option<NonNull<T>>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> List<T> {
    /// Creates a new List in the absent state, with length and capacity 0. Memory will be
    /// allocated when the List first grows.
    ///
    /// # Examples
    /// ```
    /// # use foundation::collections::contiguous::List;
    /// let list: List<u8> = List::new();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.cap(), 0);
    /// assert!(list.is_empty() && list.is_full());
    /// ```
    pub const fn new() -> List<T> {
        List::new_in(Global)
    }

    /// Creates a new List with at least the provided capacity.
    ///
    /// # Panics
    /// Panics if the allocation fails or its size would exceed [`isize::MAX`].
    pub fn with_cap(cap: usize) -> List<T> {
        let mut list = List::new();
        list.reserve(cap);
        list
    }
}

impl<T, A: RawAlloc> List<T, A> {
    /// Creates a new List in the absent state which will allocate with `alloc`.
    pub const fn new_in(alloc: A) -> List<T, A> {
        List {
            ptr: None,
            len: 0,
            cap: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn cap(&self) -> usize {
        self.cap
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if another element can't be added without growing. An absent List is always
    /// full.
    pub const fn is_full(&self) -> bool {
        self.len == self.cap
    }

    /// Returns true if the List doesn't hold any storage yet.
    pub const fn is_absent(&self) -> bool {
        self.ptr.is_none()
    }

    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Translates `index` into an offset from the start of the List. Negative indices count back
    /// from the end, so `-1` resolves to `len - 1`. Returns [`None`] if the translated index isn't
    /// within `[0, len)`.
    ///
    /// # Examples
    /// ```
    /// # use foundation::collections::contiguous::List;
    /// let list: List<_> = (0..5).collect();
    /// assert_eq!(list.resolve(1), Some(1));
    /// assert_eq!(list.resolve(-1), Some(4));
    /// assert_eq!(list.resolve(-6), None);
    /// ```
    pub const fn resolve(&self, index: isize) -> Option<usize> {
        let offset = if index < 0 {
            match self.len.checked_sub(index.unsigned_abs()) {
                Some(offset) => offset,
                None => return None,
            }
        } else {
            index.unsigned_abs()
        };

        if offset < self.len { Some(offset) } else { None }
    }

    /// Returns true if `index`, after translating negative values, refers to an element.
    pub const fn in_bounds(&self, index: isize) -> bool {
        self.resolve(index).is_some()
    }

    /// Translates `index` like [`List::resolve`], panicking if it is out of bounds.
    ///
    /// # Panics
    /// Panics if the translated index isn't within `[0, len)`.
    #[track_caller]
    pub fn check(&self, index: isize) -> usize {
        self.resolve(index)
            .ok_or(IndexOutOfBounds {
                index,
                len: self.len,
            })
            .or_panic()
    }

    /// Returns a reference to the element at `index`, if it is in bounds.
    pub fn get(&self, index: isize) -> Option<&T> {
        let offset = self.resolve(index)?;
        Some(&self[offset])
    }

    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        let offset = self.resolve(index)?;
        Some(&mut self[offset])
    }

    /// Grows the List by `additional` elements produced by `fill`, ensuring the capacity is at
    /// least `min_cap`.
    ///
    /// If the current capacity already covers both the new length and `min_cap`, no allocation
    /// takes place. Otherwise the List is moved to a single new allocation with a capacity of at
    /// least double the current one, and at least [`MIN_CAPACITY`].
    ///
    /// # Errors
    /// Throws an [`ArithmeticOverflow`](StatusCode::ArithmeticOverflow) if any of the size
    /// computations overflow, or an [`AllocationFailure`](StatusCode::AllocationFailure) if the
    /// allocator fails. In both cases the List is left unmodified.
    ///
    /// # Examples
    /// ```
    /// # use foundation::collections::contiguous::List;
    /// let mut list = List::new();
    /// list.try_grow_with(0, 3, || 7_u8).unwrap();
    /// assert_eq!(&*list, &[7, 7, 7]);
    /// assert_eq!(list.cap(), 8);
    /// ```
    pub fn try_grow_with<F>(
        &mut self,
        min_cap: usize,
        additional: usize,
        mut fill: F,
    ) -> Outcome<()>
    where
        F: FnMut() -> T,
    {
        let new_len = checked_add(self.len, additional)?;
        self.ensure_cap(cmp::max(min_cap, new_len))?;

        for _ in 0..additional {
            // SAFETY: ensure_cap has made room for new_len elements and len is only incremented
            // after each write.
            unsafe { self.push_unchecked(fill()) };
        }

        Ok(())
    }

    /// Grows the List by `additional` elements produced by `fill`.
    ///
    /// # Panics
    /// Panics if growing fails, see [`List::try_grow_with`].
    pub fn grow_with<F>(&mut self, min_cap: usize, additional: usize, fill: F)
    where
        F: FnMut() -> T,
    {
        self.try_grow_with(min_cap, additional, fill).or_panic()
    }

    /// Pushes `value` onto the end of the List, growing if required. On failure the List is
    /// unchanged and `value` is dropped.
    ///
    /// # Errors
    /// Throws if growing fails, see [`List::try_grow_with`].
    pub fn try_push(&mut self, value: T) -> Outcome<()> {
        self.ensure_cap(checked_add(self.len, 1)?)?;
        // SAFETY: The capacity has just been adjusted to fit the new value.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Pushes `value` onto the end of the List, growing if required.
    ///
    /// # Panics
    /// Panics if growing fails, see [`List::try_grow_with`].
    ///
    /// # Examples
    /// ```
    /// # use foundation::collections::contiguous::List;
    /// let mut list = List::new();
    /// for i in 0..=5 {
    ///     list.push(i);
    /// }
    /// assert_eq!(&*list, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push(&mut self, value: T) {
        self.try_push(value).or_panic()
    }

    /// Pushes `value` without checking the capacity.
    ///
    /// # Safety
    /// The List must have spare capacity for at least one more element.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees len < cap, so the List holds an allocation (or a dangling
        // pointer for zero-sized types) and the offset is in bounds.
        unsafe {
            self.ptr.unwrap_unchecked().add(self.len).write(value);
        }
        self.len += 1;
    }

    /// Removes the last element and returns it, if the List isn't empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY: The element at the old len - 1 is initialized, and forgotten by decrementing len
        // before it is read out.
        unsafe { Some(self.ptr?.add(self.len).read()) }
    }

    /// Ensures that the List can hold at least `cap` elements without changing its length.
    ///
    /// # Errors
    /// Throws if growing fails, see [`List::try_grow_with`].
    pub fn try_reserve(&mut self, cap: usize) -> Outcome<()> {
        self.ensure_cap(cap)
    }

    /// Ensures that the List can hold at least `cap` elements.
    ///
    /// # Panics
    /// Panics if growing fails, see [`List::try_grow_with`].
    pub fn reserve(&mut self, cap: usize) {
        self.try_reserve(cap).or_panic()
    }

    /// Drops all elements, keeping the allocation.
    pub fn clear(&mut self) {
        let elements: *mut [T] = &mut **self;
        // Zero len first, so a panicking drop can't lead to a double drop.
        self.len = 0;
        // SAFETY: The slice covered exactly the initialized elements, which are no longer tracked.
        unsafe { ptr::drop_in_place(elements) };
    }

    /// Shrinks the capacity to match the length. An empty List returns to the absent state.
    ///
    /// # Errors
    /// Throws an [`AllocationFailure`](StatusCode::AllocationFailure) if the allocator can't move
    /// the elements, leaving the List unchanged.
    pub fn try_shrink_to_fit(&mut self) -> Outcome<()> {
        if self.len == self.cap {
            return Ok(());
        }
        if self.len == 0 {
            self.release();
            return Ok(());
        }
        self.realloc(self.len)
    }

    /// Shrinks the capacity to match the length.
    ///
    /// # Panics
    /// Panics if the allocator fails, see [`List::try_shrink_to_fit`].
    pub fn shrink_to_fit(&mut self) {
        self.try_shrink_to_fit().or_panic()
    }

    /// Releases the List's storage, dropping all elements. Disposing of an absent List does
    /// nothing.
    pub fn dispose(self) {
        drop(self)
    }

    /// Ensures that the capacity is at least `target`, applying the doubling policy if a new
    /// allocation is needed.
    fn ensure_cap(&mut self, target: usize) -> Outcome<()> {
        if target <= self.cap {
            return Ok(());
        }

        let doubled = checked_mul(self.cap, GROWTH_FACTOR)?;
        let new_cap = cmp::max(target, cmp::max(doubled, MIN_CAPACITY));
        self.realloc(new_cap)
    }

    /// Moves the List into an allocation of exactly `new_cap` elements, where `new_cap > 0` and
    /// `new_cap >= len`. The List is untouched if this fails.
    fn realloc(&mut self, new_cap: usize) -> Outcome<()> {
        let new_layout = Self::layout_for(new_cap)?;

        let new_ptr = if new_layout.size() == 0 {
            NonNull::dangling()
        } else {
            let result = match self.current_block() {
                None => self.alloc.allocate(new_layout),
                Some((ptr, old_layout)) if new_layout.size() > old_layout.size() => {
                    // SAFETY: The block was allocated by self.alloc with old_layout and the new
                    // layout is larger with the same alignment.
                    unsafe { self.alloc.grow(ptr, old_layout, new_layout) }
                },
                Some((ptr, old_layout)) => {
                    // SAFETY: As above, with a smaller, non-zero layout. new_cap >= len keeps
                    // every element inside the new block.
                    unsafe { self.alloc.shrink(ptr, old_layout, new_layout) }
                },
            };

            result
                .map_err(|err| Thrown::here(StatusCode::AllocationFailure, err.to_string()))?
                .cast()
        };

        self.ptr = Some(new_ptr);
        self.cap = new_cap;
        Ok(())
    }

    /// Deallocates the storage, dropping all elements, returning the List to the absent state.
    fn release(&mut self) {
        self.clear();
        if let Some((ptr, layout)) = self.current_block() {
            // SAFETY: The block was allocated by self.alloc with this layout, and is forgotten
            // immediately after.
            unsafe { self.alloc.deallocate(ptr, layout) };
        }
        self.ptr = None;
        self.cap = 0;
    }

    /// Returns the allocated block and its layout, if one exists. Zero-sized blocks are never
    /// allocated and are reported as None.
    fn current_block(&self) -> Option<(NonNull<u8>, Layout)> {
        let ptr = self.ptr?;
        // A List only ever holds a capacity whose layout has already been computed successfully.
        let layout = Layout::array::<T>(self.cap).ok()?;
        (layout.size() != 0).then(|| (ptr.cast(), layout))
    }

    /// Computes the layout for `cap` elements, with all size arithmetic checked.
    fn layout_for(cap: usize) -> Outcome<Layout> {
        let size = checked_mul(cap, size_of::<T>())?;
        Layout::from_size_align(size, align_of::<T>()).map_err(|_| {
            Thrown::here(
                StatusCode::ArithmeticOverflow,
                format!("Capacity overflow for a List of {cap} elements!"),
            )
        })
    }
}

impl<T: Default, A: RawAlloc> List<T, A> {
    /// Grows the List by `additional` default values, ensuring the capacity is at least
    /// `min_cap`.
    ///
    /// # Errors
    /// Throws if growing fails, see [`List::try_grow_with`].
    pub fn try_grow(&mut self, min_cap: usize, additional: usize) -> Outcome<()> {
        self.try_grow_with(min_cap, additional, T::default)
    }

    /// Grows the List by `additional` default values.
    ///
    /// # Panics
    /// Panics if growing fails, see [`List::try_grow_with`].
    pub fn grow(&mut self, min_cap: usize, additional: usize) {
        self.try_grow(min_cap, additional).or_panic()
    }
}

impl<T, A: RawAlloc> Drop for List<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T, A: RawAlloc> Deref for List<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        match self.ptr {
            // SAFETY: The first len elements are initialized and the block is properly aligned.
            // The borrow checker prevents mutation of the List through the lifetime of the slice.
            Some(ptr) => unsafe { slice::from_raw_parts(ptr.as_ptr(), self.len) },
            None => &[],
        }
    }
}

impl<T, A: RawAlloc> DerefMut for List<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self.ptr {
            // SAFETY: As above, with the List uniquely borrowed.
            Some(ptr) => unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), self.len) },
            None => &mut [],
        }
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for List<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: RawAlloc> AsMut<[T]> for List<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: RawAlloc> Borrow<[T]> for List<T, A> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, A: RawAlloc> BorrowMut<[T]> for List<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: RawAlloc> Extend<T> for List<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(self.len.saturating_add(iter.size_hint().0));
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T, A: RawAlloc> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut List<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: RawAlloc + Clone> Clone for List<T, A> {
    fn clone(&self) -> Self {
        let mut list = List::new_in(self.alloc.clone());
        list.reserve(self.len);
        for value in self.iter() {
            list.push(value.clone());
        }
        list
    }
}

// SAFETY: A List uniquely owns its elements, so it can be sent wherever they can.
unsafe impl<T: Send, A: RawAlloc + Send> Send for List<T, A> {}
// SAFETY: List's safe API obeys the borrow checker, so no interior mutability occurs.
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for List<T, A> {}

impl<T: PartialEq, A: RawAlloc, B: RawAlloc> PartialEq<List<T, B>> for List<T, A> {
    fn eq(&self, other: &List<T, B>) -> bool {
        **self == **other
    }
}

impl<T: Eq, A: RawAlloc> Eq for List<T, A> {}

impl<T: Hash, A: RawAlloc> Hash for List<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug, A: RawAlloc> Debug for List<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish()
    }
}

