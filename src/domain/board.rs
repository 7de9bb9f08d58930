use crate::{
    domain::task::{Task, TaskId},
    error::{Result, TaskboardError},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

/// One of the three fixed lifecycle columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnId {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "inProgress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl ColumnId {
    /// All columns in display order
    pub const ALL: [ColumnId; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Wire name, also used as the persisted object key
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    /// Column heading: the wire name with its first letter upper-cased
    pub const fn title(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

impl FromStr for ColumnId {
    type Err = TaskboardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| TaskboardError::UnknownColumn(s.to_string()))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kanban board state: every column's tasks in display order.
///
/// The serialized form is a JSON object with exactly the keys `todo`,
/// `inProgress` and `done`, each an array of `{ "id", "name" }` records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Board {
    todo: Vec<Task>,
    #[serde(rename = "inProgress")]
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl Board {
    /// A board with all three columns empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks of a column, in order
    pub fn column(&self, column: ColumnId) -> &[Task] {
        match column {
            ColumnId::Todo => &self.todo,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Done => &self.done,
        }
    }

    fn column_mut(&mut self, column: ColumnId) -> &mut Vec<Task> {
        match column {
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Done => &mut self.done,
        }
    }

    /// Iterates columns in display order
    pub fn iter(&self) -> impl Iterator<Item = (ColumnId, &[Task])> + '_ {
        ColumnId::ALL
            .into_iter()
            .map(move |column| (column, self.column(column)))
    }

    /// Total number of tasks across all columns
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locates a task anywhere on the board
    pub fn find_task(&self, task_id: TaskId) -> Option<(ColumnId, &Task)> {
        self.iter().find_map(|(column, tasks)| {
            tasks
                .iter()
                .find(|task| task.id == task_id)
                .map(|task| (column, task))
        })
    }

    /// Looks a task up in one specific column
    pub fn task_in(&self, column: ColumnId, task_id: TaskId) -> Option<&Task> {
        self.column(column).iter().find(|task| task.id == task_id)
    }

    /// Highest id on the board, if any
    pub fn max_task_id(&self) -> Option<TaskId> {
        self.iter()
            .flat_map(|(_, tasks)| tasks.iter().map(|task| task.id))
            .max()
    }

    /// Appends a task to the end of a column
    pub(crate) fn push_task(&mut self, column: ColumnId, task: Task) {
        self.column_mut(column).push(task);
    }

    /// Removes a task from a column, preserving the order of the others
    pub(crate) fn remove_task(&mut self, column: ColumnId, task_id: TaskId) -> Result<Task> {
        let tasks = self.column_mut(column);
        let index = tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or_else(|| stale(column, task_id))?;
        Ok(tasks.remove(index))
    }

    pub(crate) fn task_mut(&mut self, column: ColumnId, task_id: TaskId) -> Result<&mut Task> {
        self.column_mut(column)
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| stale(column, task_id))
    }

    /// Checks that no task id appears twice on the board
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (_, tasks) in self.iter() {
            for task in tasks {
                if !seen.insert(task.id) {
                    return Err(TaskboardError::DuplicateTaskId(task.id.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Parses a persisted board and checks its invariants
    pub fn from_json(contents: &str) -> Result<Self> {
        let board: Board = serde_json::from_str(contents)
            .map_err(|e| TaskboardError::MalformedState(e.to_string()))?;
        board.validate()?;
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn stale(column: ColumnId, task_id: TaskId) -> TaskboardError {
    TaskboardError::StaleReference {
        column: column.to_string(),
        task_id: task_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> Board {
        let mut board = Board::new();
        board.push_task(ColumnId::Todo, Task::new(TaskId::new(1), "One"));
        board.push_task(ColumnId::Todo, Task::new(TaskId::new(2), "Two"));
        board.push_task(ColumnId::Done, Task::new(TaskId::new(3), "Three"));
        board
    }

    #[test]
    fn test_board_creation() {
        let board = Board::default();
        assert!(board.is_empty());
        for column in ColumnId::ALL {
            assert!(board.column(column).is_empty());
        }
    }

    #[test]
    fn test_column_parsing() {
        assert_eq!(ColumnId::from_str("todo").unwrap(), ColumnId::Todo);
        assert_eq!(ColumnId::from_str("inProgress").unwrap(), ColumnId::InProgress);
        assert_eq!(ColumnId::from_str("done").unwrap(), ColumnId::Done);

        assert!(matches!(
            ColumnId::from_str("backlog"),
            Err(TaskboardError::UnknownColumn(name)) if name == "backlog"
        ));
        assert!(ColumnId::from_str("Todo").is_err());
    }

    #[test]
    fn test_column_titles() {
        let titles: Vec<_> = ColumnId::ALL.iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["Todo", "InProgress", "Done"]);
    }

    #[test]
    fn test_iter_is_in_display_order() {
        let board = sample_board();
        let order: Vec<_> = board.iter().map(|(column, _)| column).collect();
        assert_eq!(order, ColumnId::ALL.to_vec());
    }

    #[test]
    fn test_find_task() {
        let board = sample_board();

        let (column, task) = board.find_task(TaskId::new(3)).unwrap();
        assert_eq!(column, ColumnId::Done);
        assert_eq!(task.name, "Three");

        assert!(board.find_task(TaskId::new(99)).is_none());
        assert!(board.task_in(ColumnId::Todo, TaskId::new(3)).is_none());
        assert_eq!(board.max_task_id(), Some(TaskId::new(3)));
        assert_eq!(Board::new().max_task_id(), None);
    }

    #[test]
    fn test_remove_task_preserves_order() {
        let mut board = sample_board();
        board.push_task(ColumnId::Todo, Task::new(TaskId::new(4), "Four"));

        let removed = board.remove_task(ColumnId::Todo, TaskId::new(2)).unwrap();
        assert_eq!(removed.name, "Two");

        let ids: Vec<_> = board.column(ColumnId::Todo).iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_remove_task_from_wrong_column_is_stale() {
        let mut board = sample_board();
        let err = board.remove_task(ColumnId::InProgress, TaskId::new(1)).unwrap_err();
        assert!(matches!(err, TaskboardError::StaleReference { .. }));
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_json_shape() {
        let board = sample_board();
        let json = board.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"todo":[{"id":1,"name":"One"},{"id":2,"name":"Two"}],"inProgress":[],"done":[{"id":3,"name":"Three"}]}"#
        );
        assert_eq!(Board::from_json(&json).unwrap(), board);
    }

    #[test]
    fn test_from_json_rejects_schema_mismatch() {
        assert!(Board::from_json("not json").is_err());
        assert!(Board::from_json("null").is_err());
        assert!(Board::from_json(r#"{"todo":[],"done":[]}"#).is_err());
        assert!(Board::from_json(r#"{"todo":[],"inProgress":[],"done":[],"later":[]}"#).is_err());
        assert!(Board::from_json(r#"{"todo":[{"id":"x","name":"a"}],"inProgress":[],"done":[]}"#).is_err());
    }

    #[test]
    fn test_from_json_reports_malformed_state() {
        assert!(matches!(
            Board::from_json("{not json"),
            Err(TaskboardError::MalformedState(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = r#"{"todo":[{"id":1,"name":"a"}],"inProgress":[],"done":[{"id":1,"name":"b"}]}"#;
        assert!(matches!(
            Board::from_json(json),
            Err(TaskboardError::DuplicateTaskId(id)) if id == "1"
        ));
    }

    #[test]
    fn test_from_json_accepts_empty_names() {
        let json = r#"{"todo":[{"id":1,"name":""}],"inProgress":[],"done":[]}"#;
        let board = Board::from_json(json).unwrap();
        assert_eq!(board.column(ColumnId::Todo)[0].name, "");
    }
}
