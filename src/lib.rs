//! CorpFlow: task board with an enforced approval workflow.
//!
//! This crate provides the workflow engine behind the CorpFlow kanban
//! board: managers create tasks, anyone moves them between columns, and
//! review stamps (`Verificado`, `Aprovado`, `Concluído`) drive tasks through
//! approval to completion.
//!
//! # Architecture
//!
//! CorpFlow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure workflow rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, files)
//!
//! # Modules
//!
//! - [`board`]: Tasks, stamps, column views, and the command dispatcher

pub mod board;
