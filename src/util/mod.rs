#![warn(missing_docs)]

#[cfg(feature = "collections")]
pub mod result;

#[cfg(all(test, feature = "contiguous"))]
pub mod alloc;
#[cfg(test)]
pub mod panic;
#[cfg(test)]
pub mod sink;
