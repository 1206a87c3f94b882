//! Reply text for failed actions. Successful replies are produced by the
//! actions themselves.

use crate::actions::{Action, ActionError};

/// Wire error code for an outcome.
pub fn code(e: &ActionError) -> &'static str {
    match e {
        ActionError::NotFound(_) => "not_found",
        ActionError::PermissionDenied => "permission_denied",
        ActionError::NotAvailable => "not_available",
        ActionError::StoreUnavailable(_) => "store_unavailable",
        ActionError::Validation(_) => "bad_params",
    }
}

pub fn render(action: Action, e: &ActionError) -> String {
    match e {
        ActionError::NotFound(id) => not_found(action, id),
        ActionError::PermissionDenied => denied(action).to_string(),
        ActionError::NotAvailable => not_available(action).to_string(),
        ActionError::StoreUnavailable(detail) | ActionError::Validation(detail) => {
            format!("⚠️ Error {}: {}", activity(action), detail)
        }
    }
}

fn not_found(action: Action, id: &str) -> String {
    match action {
        Action::UpdateStudent | Action::DeleteStudent => "❌ Student not found.".to_string(),
        _ => format!("❌ No record found for ID {id}"),
    }
}

fn denied(action: Action) -> &'static str {
    match action {
        Action::StudentFee => "🚫 You don't have permission to view this student's fee info.",
        Action::StudentAttendance => "🚫 Permission denied to view attendance.",
        Action::StudentResults => "🚫 You don't have permission to view results.",
        Action::AdminOverview => "🚫 Only admins can access overview.",
        Action::StudentList => "🚫 Only teachers/admins can view student lists.",
        Action::AddStudent => "🚫 Only admins can add students.",
        Action::UpdateStudent => "🚫 Only admins can update students.",
        Action::DeleteStudent => "🚫 Only admins can delete students.",
        _ => "🚫 Permission denied.",
    }
}

fn not_available(action: Action) -> &'static str {
    match action {
        Action::StudentAttendance => "ℹ️ Attendance data not available yet.",
        Action::StudentResults => "ℹ️ Results not available yet.",
        Action::ThesisStatus => "ℹ️ Thesis information not available.",
        _ => "ℹ️ Information not available.",
    }
}

fn activity(action: Action) -> &'static str {
    match action {
        Action::StudentFee => "fetching fee",
        Action::StudentAttendance => "fetching attendance",
        Action::StudentResults => "fetching results",
        Action::HostelInfo => "fetching hostel info",
        Action::LibraryInfo => "fetching library info",
        Action::CourseInfo => "fetching course info",
        Action::PersonalInfo => "fetching personal info",
        Action::FacultyAdvisorInfo => "fetching advisor info",
        Action::ThesisStatus => "fetching thesis info",
        Action::StudentGet => "fetching student record",
        Action::AdminOverview => "fetching admin overview",
        Action::StudentList => "fetching student list",
        Action::AddStudent => "adding student",
        Action::UpdateStudent => "updating student",
        Action::DeleteStudent => "deleting student",
    }
}
