use serde::Serialize;

/// A single to-do entry. Constructed only by the store; callers never
/// build one by hand outside of tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub description: String,
    pub completed: bool,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub photo_name: Option<String>,
}
