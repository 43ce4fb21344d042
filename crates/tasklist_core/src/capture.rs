use crate::error::AppError;
use time::macros::format_description;
use time::{Date, Time};

/// Raw, possibly-invalid user entry as collected by an input surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub text: String,
    pub description: Option<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub photo: Option<String>,
}

/// Validated payload accepted by the store for add and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub text: String,
    pub description: String,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub photo_name: Option<String>,
}

/// Translate a raw entry into a validated payload.
///
/// The primary text must be non-empty after trimming. Optional fields
/// pass through; a blank value means absent. Dates and times are
/// validated and re-emitted in canonical form so the rest of the
/// system never re-parses them.
pub fn validate_entry(raw: &RawEntry) -> Result<TaskFields, AppError> {
    let text = raw.text.trim();
    if text.is_empty() {
        return Err(AppError::invalid_input("task text is required"));
    }

    let scheduled_date = match present(raw.scheduled_date.as_deref()) {
        Some(value) => Some(canonical_date(value)?),
        None => None,
    };
    let scheduled_time = match present(raw.scheduled_time.as_deref()) {
        Some(value) => Some(canonical_time(value)?),
        None => None,
    };
    let photo_name = present(raw.photo.as_deref()).map(display_name);

    Ok(TaskFields {
        text: text.to_string(),
        description: raw.description.clone().unwrap_or_default(),
        scheduled_date,
        scheduled_time,
        photo_name,
    })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn canonical_date(raw: &str) -> Result<String, AppError> {
    let format = format_description!("[year]-[month]-[day]");
    let date = Date::parse(raw, &format)
        .map_err(|_| AppError::invalid_input("date must be YYYY-MM-DD"))?;
    date.format(&format)
        .map_err(|err| AppError::io(err.to_string()))
}

fn canonical_time(raw: &str) -> Result<String, AppError> {
    let full = format_description!("[hour]:[minute]:[second]");
    // HH:MM input is padded to HH:MM:00 so one format handles both.
    let time = Time::parse(raw, &full)
        .or_else(|_| Time::parse(&format!("{raw}:00"), &full))
        .map_err(|_| AppError::invalid_input("time must be HH:MM"))?;
    time.format(&format_description!("[hour]:[minute]"))
        .map_err(|err| AppError::io(err.to_string()))
}

/// Only a display name is captured; the file itself is never read.
fn display_name(selection: &str) -> String {
    selection
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(selection)
        .to_string()
}
