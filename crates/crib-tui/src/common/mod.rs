//! Shared helpers for the flow screen.

mod task;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskState, Tasks};
