//! Task board workflow engine for CorpFlow.
//!
//! The board keeps tasks in workflow columns, gates their progression
//! behind review stamps (`Verificado`, `Aprovado`, `Concluído`), orders
//! every view by priority, and writes each settled state through to an
//! external key-value store. The module follows hexagonal architecture:
//!
//! - Domain types and rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Command orchestration in [`services`]
//! - Runtime settings in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
