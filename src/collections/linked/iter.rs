use std::iter::FusedIterator;

use super::{Chain, Links, NodeId};

/// A borrowed iterator over the records of a [`Chain`], yielding each record's id alongside it.
/// See [`Links::iter`].
pub struct Iter<'a, T> {
    pub(crate) links: &'a Links<T>,
    // The next ids to yield from either end, None once they have crossed.
    pub(crate) front: Option<NodeId>,
    pub(crate) back: Option<NodeId>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(links: &'a Links<T>, chain: Chain) -> Iter<'a, T> {
        Iter {
            links,
            front: links.first(chain),
            back: links.last(chain),
        }
    }

    fn record(&self, id: NodeId) -> Option<(NodeId, &'a T)> {
        Some((id, self.links.get(id)?))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.links.link(id).next;
        }
        self.record(id)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.links.link(id).prev;
        }
        self.record(id)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
