//! Column view builder.
//!
//! This is the only place that decides which bucket a task renders in, so a
//! stored column and its display bucket cannot drift apart.

use super::{ColumnId, DynamicColumnId, Role, Task, sort_by_priority};
use std::collections::BTreeMap;

/// One rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    /// Column identifier.
    pub id: ColumnId,
    /// Display title.
    pub title: String,
    /// Tasks shown, in priority order. For the completed column this is
    /// capped at the configured display limit.
    pub tasks: Vec<Task>,
    /// Number of tasks in the bucket before any display limit.
    pub total: usize,
    /// Whether the viewer may remove this column.
    pub removable: bool,
}

/// Ordered, column-partitioned view of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Columns in render order: `todo`, `waitingApproval`, `inProgress`,
    /// `completed`, then dynamic columns.
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// Looks up a column by identifier.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|column| &column.id == id)
    }

    /// Returns the column identifiers in render order.
    #[must_use]
    pub fn column_ids(&self) -> Vec<&ColumnId> {
        self.columns.iter().map(|column| &column.id).collect()
    }
}

/// Returns the bucket a task renders in.
#[must_use]
pub fn display_bucket(task: &Task) -> ColumnId {
    if task.is_completed() {
        ColumnId::Completed
    } else {
        task.column().clone()
    }
}

/// Partitions tasks into column views for `role`.
///
/// Fixed columns always appear; a dynamic column appears only while at
/// least one open task references it. Dynamic columns are ordered by
/// identifier.
#[must_use]
pub fn build_view(tasks: &[Task], role: Role, completed_limit: usize) -> BoardView {
    let mut fixed: Vec<(ColumnId, Vec<Task>)> = ColumnId::FIXED
        .into_iter()
        .map(|id| (id, Vec::new()))
        .collect();
    let mut dynamic: BTreeMap<DynamicColumnId, Vec<Task>> = BTreeMap::new();

    for task in tasks {
        match display_bucket(task) {
            ColumnId::Dynamic(id) => dynamic.entry(id).or_default().push(task.clone()),
            bucket => {
                if let Some((_, items)) = fixed.iter_mut().find(|(id, _)| *id == bucket) {
                    items.push(task.clone());
                }
            }
        }
    }

    let fixed_views = fixed.into_iter().map(|(id, items)| {
        let limit = (id == ColumnId::Completed).then_some(completed_limit);
        column_view(id, items, limit, false)
    });
    let dynamic_views = dynamic.into_iter().map(|(id, items)| {
        column_view(ColumnId::Dynamic(id), items, None, role.is_manager())
    });

    BoardView {
        columns: fixed_views.chain(dynamic_views).collect(),
    }
}

fn column_view(
    id: ColumnId,
    mut tasks: Vec<Task>,
    limit: Option<usize>,
    removable: bool,
) -> ColumnView {
    sort_by_priority(&mut tasks, Task::priority);
    let total = tasks.len();
    if let Some(max) = limit {
        tasks.truncate(max);
    }
    ColumnView {
        title: id.title().to_owned(),
        id,
        tasks,
        total,
        removable,
    }
}
