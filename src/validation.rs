//! Write-time rules for projects and tasks.
//!
//! Every rule runs on its own, so a single submission can report several
//! problems at once. Handlers call these before touching the store and the
//! repositories call them again before every INSERT or UPDATE.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::project::{Project, ProjectDraft};
use crate::models::task::TaskDraft;

pub const PROJECT_NAME_MAX: usize = 100;
pub const TASK_TITLE_MAX: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An end or due date that falls before its start date.
    #[error("{}", date_range_message(.field))]
    DateRange { field: &'static str },

    #[error("Task due date cannot exceed the project end date.")]
    ProjectBounds,

    #[error("Select a valid project.")]
    UnknownProject,

    #[error("Select a valid user.")]
    UnknownAssignee,

    #[error("Select a valid choice.")]
    InvalidChoice { field: &'static str },

    #[error("This field may not be blank.")]
    Blank { field: &'static str },

    #[error("Ensure this field has at most {max} characters.")]
    TooLong { field: &'static str, max: usize },

    /// A body that could not be read into the form at all.
    #[error("Invalid request body: {detail}")]
    Malformed { detail: String },
}

fn date_range_message(field: &str) -> &'static str {
    match field {
        "end_date" => "End date cannot be earlier than start date.",
        _ => "Due date cannot be earlier than start date.",
    }
}

impl ValidationError {
    /// The submitted field the message belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::DateRange { field }
            | ValidationError::InvalidChoice { field }
            | ValidationError::Blank { field }
            | ValidationError::TooLong { field, .. } => *field,
            ValidationError::ProjectBounds => "due_date",
            ValidationError::UnknownProject => "project",
            ValidationError::UnknownAssignee => "assigned_to",
            ValidationError::Malformed { .. } => "non_field_errors",
        }
    }
}

/// All rule violations found for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.errors.contains(error)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        self.errors.extend(other.errors);
    }

    /// Messages grouped by field name, in field order.
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field()).or_default().push(error.to_string());
        }
        map
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        FieldErrors {
            errors: vec![error],
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field(), e))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

fn check_required(errors: &mut FieldErrors, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(ValidationError::Blank { field });
        return false;
    }
    true
}

fn check_text(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) {
    if check_required(errors, field, value) && value.chars().count() > max {
        errors.push(ValidationError::TooLong { field, max });
    }
}

pub fn project_errors(draft: &ProjectDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_text(&mut errors, "name", &draft.name, PROJECT_NAME_MAX);
    check_required(&mut errors, "description", &draft.description);
    if draft.end_date < draft.start_date {
        errors.push(ValidationError::DateRange { field: "end_date" });
    }
    errors
}

/// Checks a task against its parent project.
///
/// `project` is `None` when the submitted project id did not resolve; that is
/// reported as [`ValidationError::UnknownProject`] and the containment check is
/// skipped while the date-order check still runs.
pub fn task_errors(draft: &TaskDraft, project: Option<&Project>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_text(&mut errors, "title", &draft.title, TASK_TITLE_MAX);
    check_required(&mut errors, "description", &draft.description);
    if draft.due_date < draft.start_date {
        errors.push(ValidationError::DateRange { field: "due_date" });
    }
    match project {
        Some(project) if draft.due_date > project.end_date => {
            errors.push(ValidationError::ProjectBounds)
        }
        Some(_) => {}
        None => errors.push(ValidationError::UnknownProject),
    }
    errors
}

pub fn validate_project(draft: &ProjectDraft) -> Result<(), FieldErrors> {
    project_errors(draft).into_result()
}

pub fn validate_task(draft: &TaskDraft, project: &Project) -> Result<(), FieldErrors> {
    task_errors(draft, Some(project)).into_result()
}
