//! Unit tests for the board module.


use crate::board::domain::{ColumnId, NewTask};

/// Builds valid create-task input with the given title and priority.
fn new_task(title: &str, priority: &str) -> NewTask {
    NewTask::new(title, "Some description", priority, "15052025", "Ana Gerente")
        .unwrap_or_else(|err| panic!("fixture input must be valid: {err}"))
}

/// Builds a manager-created column identifier.
fn dynamic_column(name: &str) -> ColumnId {
    ColumnId::parse(name).unwrap_or_else(|err| panic!("fixture column must be valid: {err}"))
}
