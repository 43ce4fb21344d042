use crate::capture::TaskFields;
use crate::error::AppError;
use crate::model::Task;

/// Mutation acknowledgment shown to the user, toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub description: &'static str,
    pub destructive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Added,
    Deleted,
    Updated,
}

impl Notice {
    fn added() -> Self {
        Self {
            kind: NoticeKind::Added,
            title: "Task added",
            description: "Your new task has been added to the list.",
            destructive: false,
        }
    }

    fn deleted() -> Self {
        Self {
            kind: NoticeKind::Deleted,
            title: "Task deleted",
            description: "The task has been removed from your list.",
            destructive: true,
        }
    }

    fn updated() -> Self {
        Self {
            kind: NoticeKind::Updated,
            title: "Task updated",
            description: "Your task has been successfully updated.",
            destructive: false,
        }
    }
}

/// Render-layer hook. Observers run synchronously after each
/// successful mutation that carries a notice.
pub trait StoreObserver {
    fn on_notice(&self, notice: &Notice);
}

/// Owns the ordered task collection and provides the only mutation
/// surface. Newest tasks sit at the front; edits and completion
/// toggles never change a task's position.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Read-only view for the render boundary.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Result<&Task, AppError> {
        let trimmed_id = trimmed_id(id)?;
        self.tasks
            .iter()
            .find(|task| task.id == trimmed_id)
            .ok_or_else(|| AppError::not_found("task not found"))
    }

    /// Create a task from validated fields and insert it at the front.
    pub fn add(&mut self, fields: TaskFields) -> Result<Task, AppError> {
        let text = fields.text.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input("task text is required"));
        }

        self.next_id += 1;
        let task = Task {
            id: format!("task-{}", self.next_id),
            text: text.to_string(),
            description: fields.description,
            completed: false,
            scheduled_date: fields.scheduled_date,
            scheduled_time: fields.scheduled_time,
            photo_name: fields.photo_name,
        };

        self.tasks.insert(0, task.clone());
        self.emit(Notice::added());

        Ok(task)
    }

    /// Flip the completed flag of the matching task. No notice fires;
    /// completion is acknowledged by the re-render alone.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Task, AppError> {
        let trimmed_id = trimmed_id(id)?;
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == trimmed_id)
            .ok_or_else(|| AppError::not_found("task not found"))?;

        task.completed = !task.completed;
        Ok(task.clone())
    }

    /// Remove the matching task, leaving the rest in order.
    pub fn delete(&mut self, id: &str) -> Result<Task, AppError> {
        let trimmed_id = trimmed_id(id)?;
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == trimmed_id)
            .ok_or_else(|| AppError::not_found("task not found"))?;

        let removed = self.tasks.remove(index);
        self.emit(Notice::deleted());

        Ok(removed)
    }

    /// Replace all editable fields of the matching task in place. The
    /// id and completed flag are untouched. A blank text rejects the
    /// whole edit before anything is mutated.
    pub fn edit(&mut self, id: &str, fields: TaskFields) -> Result<Task, AppError> {
        let trimmed_id = trimmed_id(id)?;
        let text = fields.text.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input("task text is required"));
        }

        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == trimmed_id)
            .ok_or_else(|| AppError::not_found("task not found"))?;

        task.text = text.to_string();
        task.description = fields.description;
        task.scheduled_date = fields.scheduled_date;
        task.scheduled_time = fields.scheduled_time;
        task.photo_name = fields.photo_name;
        let updated = task.clone();

        self.emit(Notice::updated());
        Ok(updated)
    }

    fn emit(&self, notice: Notice) {
        for observer in &self.observers {
            observer.on_notice(&notice);
        }
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

fn trimmed_id(id: &str) -> Result<&str, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }
    Ok(trimmed)
}
