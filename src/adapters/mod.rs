//! Adapter implementations of the port traits.
//!
//! - `live`: backed by the real disk.
//! - `memory`: backed by an in-process map, used by tests.

pub mod live;
pub mod memory;
