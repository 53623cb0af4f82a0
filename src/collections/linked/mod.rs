//! Intrusive, circular linked lists. Revolves around the [`Links`] arena, which stores records and
//! threads them into [`Chain`]s through the [`Link`] embedded in every node.

mod error;
mod iter;
mod links;
mod node;

pub use error::*;
pub use iter::*;
pub use links::*;
pub use node::*;
