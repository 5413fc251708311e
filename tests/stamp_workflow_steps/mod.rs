//! Step definitions for stamp workflow scenarios.

mod given;
mod then;
pub mod world;
