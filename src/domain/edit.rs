use crate::domain::task::TaskId;

/// Whether an inline rename is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing(TaskId),
}

/// Transient inline-edit state. Never persisted.
///
/// At most one task is being renamed at a time. Only `begin_edit` and
/// `commit_edit` move the cursor between [`EditState::Idle`] and
/// [`EditState::Editing`]; the draft text may change freely while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditCursor {
    editing_task_id: Option<TaskId>,
    draft_text: String,
}

impl EditCursor {
    /// The cleared cursor
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn editing(task_id: TaskId, draft_text: impl Into<String>) -> Self {
        Self {
            editing_task_id: Some(task_id),
            draft_text: draft_text.into(),
        }
    }

    pub fn state(&self) -> EditState {
        match self.editing_task_id {
            Some(task_id) => EditState::Editing(task_id),
            None => EditState::Idle,
        }
    }

    pub fn editing_task_id(&self) -> Option<TaskId> {
        self.editing_task_id
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn is_editing(&self, task_id: TaskId) -> bool {
        self.editing_task_id == Some(task_id)
    }

    /// Replaces the draft text. Returns false (and changes nothing) when idle.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        if self.editing_task_id.is_none() {
            return false;
        }
        self.draft_text = text.into();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_cursor() {
        let cursor = EditCursor::idle();
        assert_eq!(cursor.state(), EditState::Idle);
        assert_eq!(cursor.editing_task_id(), None);
        assert_eq!(cursor.draft_text(), "");
    }

    #[test]
    fn test_editing_cursor() {
        let cursor = EditCursor::editing(TaskId::new(7), "Draft");
        assert_eq!(cursor.state(), EditState::Editing(TaskId::new(7)));
        assert!(cursor.is_editing(TaskId::new(7)));
        assert!(!cursor.is_editing(TaskId::new(8)));
        assert_eq!(cursor.draft_text(), "Draft");
    }

    #[test]
    fn test_set_draft_only_while_editing() {
        let mut cursor = EditCursor::idle();
        assert!(!cursor.set_draft("ignored"));
        assert_eq!(cursor, EditCursor::idle());

        let mut cursor = EditCursor::editing(TaskId::new(1), "A");
        assert!(cursor.set_draft("B"));
        assert_eq!(cursor.draft_text(), "B");
        assert_eq!(cursor.state(), EditState::Editing(TaskId::new(1)));
    }
}
