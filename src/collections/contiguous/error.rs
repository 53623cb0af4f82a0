use derive_more::{Display, Error};

/// An index that doesn't refer to an element, after translating negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Index {index} out of bounds for List with {len} elements!")]
pub struct IndexOutOfBounds {
    pub index: isize,
    pub len: usize,
}
