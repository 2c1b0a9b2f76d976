//! Subject and role lookup backends.

pub mod memory;

pub use memory::{Account, MemoryDirectory};
