use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::config::Palette;
use tasklist_core::editor::Draft;
use tasklist_core::model::Task;

pub const EMPTY_LIST_MESSAGE: &str = "No tasks yet. Add one to get started.";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "done")]
    done: String,
    #[tabled(rename = "text")]
    text: String,
    #[tabled(rename = "description")]
    description: String,
    #[tabled(rename = "date")]
    date: String,
    #[tabled(rename = "time")]
    time: String,
    #[tabled(rename = "photo")]
    photo: String,
}

fn row(task: &Task, palette: &Palette) -> TaskRow {
    let text = if task.completed {
        palette.paint_muted(&task.text)
    } else {
        palette.paint_accent(&task.text)
    };

    TaskRow {
        id: task.id.clone(),
        done: if task.completed { "[x]" } else { "[ ]" }.to_string(),
        text,
        description: task.description.clone(),
        date: task.scheduled_date.clone().unwrap_or_else(|| "-".into()),
        time: task.scheduled_time.clone().unwrap_or_else(|| "-".into()),
        photo: task.photo_name.clone().unwrap_or_else(|| "-".into()),
    }
}

pub fn render_table(tasks: &[Task], palette: &Palette) -> String {
    let rows: Vec<TaskRow> = tasks.iter().map(|task| row(task, palette)).collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

pub fn print_tasks(tasks: &[Task], palette: &Palette) {
    if tasks.is_empty() {
        println!("{EMPTY_LIST_MESSAGE}");
        return;
    }
    println!("{}", render_table(tasks, palette));
}

pub fn print_tasks_json(tasks: &[Task]) {
    let payload: Vec<serde_json::Value> = tasks.iter().map(task_json).collect();
    println!("{}", serde_json::Value::Array(payload));
}

pub fn print_task_json(task: &Task) {
    println!("{}", task_json(task));
}

fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!(task)
}

pub fn print_task_plain(task: &Task) {
    println!("id: {}", task.id);
    println!("text: {}", task.text);
    println!("description: {}", task.description);
    println!("completed: {}", if task.completed { "yes" } else { "no" });
    println!("date: {}", task.scheduled_date.as_deref().unwrap_or("-"));
    println!("time: {}", task.scheduled_time.as_deref().unwrap_or("-"));
    println!("photo: {}", task.photo_name.as_deref().unwrap_or("-"));
}

pub fn print_draft(draft: &Draft) {
    println!("text: {}", draft.text);
    println!("description: {}", draft.description);
    println!("date: {}", draft.scheduled_date.as_deref().unwrap_or("-"));
    println!("time: {}", draft.scheduled_time.as_deref().unwrap_or("-"));
    println!("photo: {}", draft.photo.as_deref().unwrap_or("-"));
}
