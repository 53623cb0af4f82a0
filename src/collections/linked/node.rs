use std::fmt::{self, Display, Formatter};

/// A stable handle to a node in a [`Links`](super::Links) arena. Ids of removed nodes may be reused
/// by later insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the position of the node within its arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The pair of references embedded in every node. A Link is either detached, with both sides
/// [`None`], or part of exactly one ring.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    pub next: Option<NodeId>,
    pub prev: Option<NodeId>,
}

impl Link {
    pub const DETACHED: Link = Link {
        next: None,
        prev: None,
    };

    pub const fn is_detached(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    pub const fn is_attached(&self) -> bool {
        !self.is_detached()
    }
}

/// A handle to a circular list within a [`Links`](super::Links) arena, anchored by its sentinel
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chain(pub(crate) NodeId);

impl Chain {
    /// Returns the id of the sentinel node, which can be used as a reference point for
    /// [`Links::insert_before`](super::Links::insert_before) and
    /// [`Links::append_after`](super::Links::append_after).
    pub const fn sentinel(self) -> NodeId {
        self.0
    }
}
