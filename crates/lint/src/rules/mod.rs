//! Built-in analyzers.

pub mod documentation;
pub mod placement;
pub mod unchecked_pointer;
