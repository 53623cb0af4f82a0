use derive_more::{Display, Error, IsVariant};

use super::NodeId;

/// A misuse of a [`NodeId`] or [`Chain`](super::Chain) handle when linking records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, IsVariant)]
pub enum LinkError {
    #[display("Node {node} doesn't refer to a live node!")]
    Stale { node: NodeId },
    #[display("Node {node} is already linked into a Chain!")]
    AlreadyLinked { node: NodeId },
    #[display("Node {node} isn't linked into a Chain!")]
    NotLinked { node: NodeId },
    #[display("Node {node} is a Chain's sentinel and can't be unlinked!")]
    SentinelUnlink { node: NodeId },
    #[display("Node {node} isn't the sentinel of a live Chain!")]
    NotAChain { node: NodeId },
}
