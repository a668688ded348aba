use serde::Deserialize;

use crate::models::task::{Task, TaskPriority, TaskStatus};

/// Query string accepted by the task list.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Criterion<T> {
    Any,
    Only(T),
    /// An unrecognised value was requested; nothing can match.
    Nothing,
}

impl<T: std::str::FromStr + PartialEq + Copy> Criterion<T> {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Criterion::Any,
            Some(value) => value.parse().map_or(Criterion::Nothing, Criterion::Only),
        }
    }

    fn accepts(&self, value: T) -> bool {
        match self {
            Criterion::Any => true,
            Criterion::Only(wanted) => *wanted == value,
            Criterion::Nothing => false,
        }
    }
}

/// Status and priority constraints, AND-combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFilter {
    status: Criterion<TaskStatus>,
    priority: Criterion<TaskPriority>,
}

impl TaskFilter {
    pub fn from_query(query: &TaskListQuery) -> Self {
        TaskFilter {
            status: Criterion::parse(query.status.as_deref()),
            priority: Criterion::parse(query.priority.as_deref()),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.accepts(task.status) && self.priority.accepts(task.priority)
    }

    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}
