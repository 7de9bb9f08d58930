use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a task, unique across the whole board.
///
/// Freshly created ids are milliseconds since the Unix epoch, so they sort in
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// The smallest id strictly greater than this one
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named unit of work on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
}

impl Task {
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Replaces the name verbatim. No trimming or emptiness check is applied.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Source of fresh task ids.
///
/// Implementations must never return an id less than or equal to one they
/// returned before.
pub trait IdSource {
    fn next_id(&mut self) -> TaskId;
}

/// Wall-clock id source in milliseconds, bumped forward when the clock
/// repeats or steps back.
#[derive(Debug, Default)]
pub struct TimestampIdSource {
    last: Option<TaskId>,
}

impl TimestampIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self, now_millis: i64) -> TaskId {
        let candidate = TaskId::new(now_millis);
        let id = match self.last {
            Some(last) if candidate <= last => last.successor(),
            _ => candidate,
        };
        self.last = Some(id);
        id
    }
}

impl IdSource for TimestampIdSource {
    fn next_id(&mut self) -> TaskId {
        self.issue(Utc::now().timestamp_millis())
    }
}

/// Deterministic counter, mostly useful in tests and replays
#[derive(Debug, Clone)]
pub struct SequentialIdSource {
    next: i64,
}

impl SequentialIdSource {
    pub fn starting_at(first: i64) -> Self {
        Self { next: first }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_display() {
        assert_eq!(TaskId::new(17).to_string(), "17");
    }

    #[test]
    fn test_task_id_serializes_as_bare_integer() {
        let task = Task::new(TaskId::new(5), "Write spec");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":5,"name":"Write spec"}"#);

        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn test_rename_keeps_text_verbatim() {
        let mut task = Task::new(TaskId::new(1), "Old");
        task.rename("  padded  ");
        assert_eq!(task.name, "  padded  ");

        task.rename("");
        assert_eq!(task.name, "");
        assert_eq!(task.id, TaskId::new(1));
    }

    #[test]
    fn test_timestamp_ids_follow_clock() {
        let mut ids = TimestampIdSource::new();
        assert_eq!(ids.issue(1_000), TaskId::new(1_000));
        assert_eq!(ids.issue(2_500), TaskId::new(2_500));
    }

    #[test]
    fn test_timestamp_ids_same_millisecond_are_unique() {
        let mut ids = TimestampIdSource::new();
        let first = ids.issue(1_000);
        let second = ids.issue(1_000);
        let third = ids.issue(1_000);

        assert_eq!(first, TaskId::new(1_000));
        assert_eq!(second, TaskId::new(1_001));
        assert_eq!(third, TaskId::new(1_002));
    }

    #[test]
    fn test_timestamp_ids_survive_clock_stepping_back() {
        let mut ids = TimestampIdSource::new();
        let first = ids.issue(5_000);
        let second = ids.issue(4_000);
        assert!(second > first);
    }

    #[test]
    fn test_timestamp_ids_from_real_clock_increase() {
        let mut ids = TimestampIdSource::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIdSource::starting_at(10);
        assert_eq!(ids.next_id(), TaskId::new(10));
        assert_eq!(ids.next_id(), TaskId::new(11));
    }
}
