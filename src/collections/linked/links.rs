use std::fmt::{self, Debug, Formatter};
use std::ops::{Index, IndexMut};

use super::{Chain, Iter, Link, LinkError, NodeId};
use crate::collections::contiguous::List;
use crate::util::result::ResultExtension;

pub(crate) enum Slot<T> {
    Record { value: T, link: Link },
    Sentinel { link: Link },
    Vacant { next_free: Option<NodeId> },
}

/// An arena of records which can be linked into circular, doubly linked [`Chain`]s.
///
/// Every record carries a single [`Link`], so a record belongs to at most one Chain at a time.
/// Records are addressed by stable [`NodeId`]s, and linking or unlinking only rewrites the ids
/// stored in those Links, without ever allocating or moving a record. A record can own Chains of
/// its own, by storing their [`Chain`] handles, to build trees.
///
/// Each Chain is anchored by a sentinel node living in the same arena. The sentinel is never a data
/// element: an empty Chain is a sentinel linked to itself.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of records in the Chain in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `insert` | `O(1)`* |
/// | `take` | `O(1)` |
/// | `insert_before/append_after` | `O(1)` |
/// | `prepend/append` | `O(1)` |
/// | `unlink` | `O(1)` |
/// | `for_each` | `O(n)` |
/// | `chain_len` | `O(n)` |
///
/// \* Amortized, inserting may need to grow the underlying [`List`].
///
/// # Examples
/// ```
/// # use foundation::collections::linked::Links;
/// let mut links = Links::new();
/// let chain = links.chain();
///
/// let a = links.insert("a");
/// let b = links.insert("b");
/// links.append(chain, a);
/// links.prepend(chain, b);
///
/// let values: Vec<_> = links.iter(chain).map(|(_, value)| *value).collect();
/// assert_eq!(values, ["b", "a"]);
/// assert!(links.are_linked(b, a));
/// ```
pub struct Links<T> {
    pub(crate) slots: List<Slot<T>>,
    pub(crate) free: Option<NodeId>,
    pub(crate) records: usize,
}

impl<T> Links<T> {
    pub const fn new() -> Links<T> {
        Links {
            slots: List::new(),
            free: None,
            records: 0,
        }
    }

    /// Returns the number of records in the arena, linked or not.
    pub const fn len(&self) -> usize {
        self.records
    }

    pub const fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Adds a detached record to the arena, returning its id.
    pub fn insert(&mut self, value: T) -> NodeId {
        self.records += 1;
        self.occupy(Slot::Record {
            value,
            link: Link::DETACHED,
        })
    }

    /// Creates a new, empty Chain.
    pub fn chain(&mut self) -> Chain {
        let id = self.occupy(Slot::Sentinel {
            link: Link::DETACHED,
        });
        *self.link_mut(id) = Link {
            next: Some(id),
            prev: Some(id),
        };
        Chain(id)
    }

    /// Removes a record from the arena, unlinking it first. Returns [`None`] if `id` doesn't refer
    /// to a record.
    pub fn take(&mut self, id: NodeId) -> Option<T> {
        if !matches!(self.slot(id), Some(Slot::Record { .. })) {
            return None;
        }

        self.unlink(id);
        self.records -= 1;
        match self.vacate(id) {
            Slot::Record { value, .. } => Some(value),
            // The slot was checked to hold a record above.
            _ => None,
        }
    }

    /// Destroys a Chain, detaching every record that was linked into it. The records themselves
    /// remain in the arena.
    ///
    /// # Panics
    /// Panics if `chain` has already been removed, even if its slot has since been reused.
    #[track_caller]
    pub fn remove_chain(&mut self, chain: Chain) {
        let sentinel = chain.sentinel();
        let mut current = self.chain_link(chain).next;
        while let Some(id) = current.filter(|id| *id != sentinel) {
            current = self.link(id).next;
            *self.link_mut(id) = Link::DETACHED;
        }
        self.vacate(sentinel);
    }

    /// Returns a reference to the record with the provided `id`, if it exists.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slot(id)? {
            Slot::Record { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match (*self.slots).get_mut(id.index())? {
            Slot::Record { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns a copy of the Link of the provided node, which may be a record or a sentinel.
    ///
    /// # Panics
    /// Panics if `id` doesn't refer to a live node.
    #[track_caller]
    pub fn link(&self, id: NodeId) -> Link {
        self.try_link(id).or_panic()
    }

    /// Returns a copy of the Link of the provided node.
    ///
    /// # Errors
    /// Returns [`LinkError::Stale`] if `id` doesn't refer to a live node.
    pub fn try_link(&self, id: NodeId) -> Result<Link, LinkError> {
        match self.slot(id) {
            Some(Slot::Record { link, .. } | Slot::Sentinel { link }) => Ok(*link),
            _ => Err(LinkError::Stale { node: id }),
        }
    }

    /// Sets `a.next = b` and `b.prev = a`. Either side may be [`None`], in which case only the
    /// other half of the assignment happens.
    ///
    /// This is the primitive the other linking operations are built from. It doesn't maintain the
    /// ring invariant by itself.
    ///
    /// # Panics
    /// Panics if either id doesn't refer to a live node.
    pub fn attach(&mut self, a: Option<NodeId>, b: Option<NodeId>) {
        if let Some(a) = a {
            self.link_mut(a).next = b;
        }
        if let Some(b) = b {
            self.link_mut(b).prev = a;
        }
    }

    /// Links the detached node `new` immediately before `reference`, in whichever Chain
    /// `reference` belongs to.
    ///
    /// # Errors
    /// Returns [`LinkError::AlreadyLinked`] if `new` is already attached,
    /// [`LinkError::NotLinked`] if `reference` isn't, or [`LinkError::Stale`] if either id doesn't
    /// refer to a live node. The arena is left untouched on error.
    pub fn try_insert_before(&mut self, new: NodeId, reference: NodeId) -> Result<(), LinkError> {
        let prev = self.check_splice(new, reference)?.prev;
        self.attach(prev, Some(new));
        self.attach(Some(new), Some(reference));
        Ok(())
    }

    /// Links the detached node `new` immediately before `reference`.
    ///
    /// # Panics
    /// Panics under the same conditions that [`Links::try_insert_before`] fails.
    #[track_caller]
    pub fn insert_before(&mut self, new: NodeId, reference: NodeId) {
        self.try_insert_before(new, reference).or_panic()
    }

    /// Links the detached node `new` immediately after `reference`, in whichever Chain
    /// `reference` belongs to.
    ///
    /// # Errors
    /// Fails under the same conditions as [`Links::try_insert_before`].
    pub fn try_append_after(&mut self, reference: NodeId, new: NodeId) -> Result<(), LinkError> {
        let next = self.check_splice(new, reference)?.next;
        self.attach(Some(reference), Some(new));
        self.attach(Some(new), next);
        Ok(())
    }

    /// Links the detached node `new` immediately after `reference`.
    ///
    /// # Panics
    /// Panics under the same conditions that [`Links::try_append_after`] fails.
    #[track_caller]
    pub fn append_after(&mut self, reference: NodeId, new: NodeId) {
        self.try_append_after(reference, new).or_panic()
    }

    /// Links `id` at the front of `chain`.
    ///
    /// # Panics
    /// Panics if `chain` has been removed, or if `id` can't be linked.
    #[track_caller]
    pub fn prepend(&mut self, chain: Chain, id: NodeId) {
        self.chain_link(chain);
        self.append_after(chain.sentinel(), id)
    }

    /// Links `id` at the back of `chain`.
    ///
    /// # Panics
    /// Panics if `chain` has been removed, or if `id` can't be linked.
    #[track_caller]
    pub fn append(&mut self, chain: Chain, id: NodeId) {
        self.chain_link(chain);
        self.insert_before(id, chain.sentinel())
    }

    /// Unlinks `id` from its Chain, joining its neighbours together and leaving it detached. Does
    /// nothing for a detached node.
    ///
    /// # Panics
    /// Panics if `id` is a sentinel, or doesn't refer to a live node.
    #[track_caller]
    pub fn unlink(&mut self, id: NodeId) {
        if matches!(self.slot(id), Some(Slot::Sentinel { .. })) {
            Err::<(), _>(LinkError::SentinelUnlink { node: id }).or_panic()
        }

        let link = self.link(id);
        if link.is_detached() {
            return;
        }

        self.attach(link.prev, link.next);
        *self.link_mut(id) = Link::DETACHED;
    }

    /// Visits every record of `chain` in order, from first to last.
    ///
    /// # Examples
    /// ```
    /// # use foundation::collections::linked::Links;
    /// let mut links = Links::new();
    /// let chain = links.chain();
    /// for i in 1..=3 {
    ///     let id = links.insert(i);
    ///     links.append(chain, id);
    /// }
    ///
    /// links.for_each(chain, |_, value| *value *= 10);
    /// let mut total = 0;
    /// links.for_each(chain, |_, value| total += *value);
    /// assert_eq!(total, 60);
    /// ```
    #[track_caller]
    pub fn for_each<F>(&mut self, chain: Chain, mut visit: F)
    where
        F: FnMut(NodeId, &mut T),
    {
        let sentinel = chain.sentinel();
        let mut current = self.chain_link(chain).next;
        while let Some(id) = current.filter(|id| *id != sentinel) {
            current = self.link(id).next;
            if let Some(value) = self.get_mut(id) {
                visit(id, value);
            }
        }
    }

    /// Returns an iterator over the ids and records of `chain`, in order.
    #[track_caller]
    pub fn iter(&self, chain: Chain) -> Iter<'_, T> {
        Iter::new(self, chain)
    }

    /// Returns the id of the first record in `chain`, if it isn't empty.
    ///
    /// # Panics
    /// Panics if `chain` has been removed.
    #[track_caller]
    pub fn first(&self, chain: Chain) -> Option<NodeId> {
        self.chain_link(chain).next.filter(|id| *id != chain.sentinel())
    }

    /// Returns the id of the last record in `chain`, if it isn't empty.
    #[track_caller]
    pub fn last(&self, chain: Chain) -> Option<NodeId> {
        self.chain_link(chain).prev.filter(|id| *id != chain.sentinel())
    }

    /// Counts the records in `chain`.
    #[track_caller]
    pub fn chain_len(&self, chain: Chain) -> usize {
        self.iter(chain).count()
    }

    /// Returns true if `chain` doesn't contain any records.
    #[track_caller]
    pub fn is_chain_empty(&self, chain: Chain) -> bool {
        self.chain_link(chain).next == Some(chain.sentinel())
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        !self.is_detached(id)
    }

    pub fn is_detached(&self, id: NodeId) -> bool {
        self.link(id).is_detached()
    }

    /// Returns true if `b` directly follows `a`, in both directions.
    pub fn are_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.link(a).next == Some(b) && self.link(b).prev == Some(a)
    }

    pub(crate) fn slot(&self, id: NodeId) -> Option<&Slot<T>> {
        (*self.slots).get(id.index())
    }

    #[track_caller]
    fn link_mut(&mut self, id: NodeId) -> &mut Link {
        match (*self.slots).get_mut(id.index()) {
            Some(Slot::Record { link, .. } | Slot::Sentinel { link }) => link,
            _ => Err(LinkError::Stale { node: id }).or_panic(),
        }
    }

    /// Returns the Link of the sentinel anchoring `chain`.
    #[track_caller]
    fn chain_link(&self, chain: Chain) -> Link {
        match self.slot(chain.sentinel()) {
            Some(Slot::Sentinel { link }) => *link,
            _ => Err(LinkError::NotAChain {
                node: chain.sentinel(),
            })
            .or_panic(),
        }
    }

    /// Checks that `new` can be spliced in next to `reference`, returning the Link of `reference`.
    fn check_splice(&self, new: NodeId, reference: NodeId) -> Result<Link, LinkError> {
        if self.try_link(new)?.is_attached() {
            return Err(LinkError::AlreadyLinked { node: new });
        }

        let link = self.try_link(reference)?;
        if link.is_detached() {
            return Err(LinkError::NotLinked { node: reference });
        }
        Ok(link)
    }

    fn occupy(&mut self, slot: Slot<T>) -> NodeId {
        match self.free {
            Some(id) => {
                let old = std::mem::replace(&mut self.slots[id.index()], slot);
                if let Slot::Vacant { next_free } = old {
                    self.free = next_free;
                }
                id
            },
            None => {
                self.slots.push(slot);
                NodeId(self.slots.len() - 1)
            },
        }
    }

    fn vacate(&mut self, id: NodeId) -> Slot<T> {
        let slot = std::mem::replace(
            &mut self.slots[id.index()],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(id);
        slot
    }
}

impl<T> Default for Links<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Links<T> {
    type Output = T;

    /// # Panics
    /// Panics if `index` doesn't refer to a record.
    #[track_caller]
    fn index(&self, index: NodeId) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => Err::<&T, _>(LinkError::Stale { node: index }).or_panic(),
        }
    }
}

impl<T> IndexMut<NodeId> for Links<T> {
    #[track_caller]
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(value) => value,
            None => Err::<&mut T, _>(LinkError::Stale { node: index }).or_panic(),
        }
    }
}

impl<T: Debug> Debug for Links<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Record { value, link } => {
                    map.entry(&NodeId(index), &(value, link));
                },
                Slot::Sentinel { link } => {
                    map.entry(&NodeId(index), link);
                },
                Slot::Vacant { .. } => {},
            }
        }
        map.finish()
    }
}
