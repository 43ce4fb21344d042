use crate::capture::{self, RawEntry};
use crate::error::AppError;
use crate::model::Task;
use crate::store::TaskStore;

/// In-progress field values for one task. Draft edits never reach the
/// store until the session is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub description: String,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub photo: Option<String>,
}

/// The Editing half of the per-item Viewing/Editing state machine.
/// A view holds `Option<EditSession>`: `None` is Viewing, `Some` is
/// Editing. Cancel is dropping the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    task_id: String,
    draft: Draft,
}

impl EditSession {
    /// Enter Editing, snapshotting the task's committed fields.
    /// Completed tasks cannot be edited.
    pub fn begin(task: &Task) -> Result<Self, AppError> {
        if task.completed {
            return Err(AppError::invalid_input("completed tasks cannot be edited"));
        }

        Ok(Self {
            task_id: task.id.clone(),
            draft: Draft {
                text: task.text.clone(),
                description: task.description.clone(),
                scheduled_date: task.scheduled_date.clone(),
                scheduled_time: task.scheduled_time.clone(),
                photo: task.photo_name.clone(),
            },
        })
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_text(&mut self, value: &str) {
        self.draft.text = value.to_string();
    }

    pub fn set_description(&mut self, value: &str) {
        self.draft.description = value.to_string();
    }

    pub fn set_date(&mut self, value: Option<&str>) {
        self.draft.scheduled_date = optional(value);
    }

    pub fn set_time(&mut self, value: Option<&str>) {
        self.draft.scheduled_time = optional(value);
    }

    pub fn set_photo(&mut self, value: Option<&str>) {
        self.draft.photo = optional(value);
    }

    /// Commit the draft: validate it through the capture contract and
    /// apply it to the store. On failure nothing is committed and the
    /// session stays usable.
    pub fn save(&self, store: &mut TaskStore) -> Result<Task, AppError> {
        let raw = RawEntry {
            text: self.draft.text.clone(),
            description: Some(self.draft.description.clone()),
            scheduled_date: self.draft.scheduled_date.clone(),
            scheduled_time: self.draft.scheduled_time.clone(),
            photo: self.draft.photo.clone(),
        };
        let fields = capture::validate_entry(&raw)?;
        store.edit(&self.task_id, fields)
    }
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
