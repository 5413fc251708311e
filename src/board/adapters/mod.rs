//! Adapter implementations for board ports.
//!
//! - [`memory`]: process-local store for tests and embedding
//! - [`file`]: one JSON document per record inside a directory
//! - [`records`]: persisted record shapes and the load-tolerant decoder

pub mod file;
pub mod memory;
pub mod records;
