//! Assistant actions over student records.
//!
//! Every action takes the store it works on plus the per-request context and
//! returns either the reply text or an [`ActionError`]. Turning an error into
//! something a person reads is left to the caller (see `ipc::messages`).

pub mod admin;
pub mod queries;
pub mod records;

use crate::policy::ActorContext;
use crate::store::StoreError;
use thiserror::Error;

pub type ActionResult<T> = Result<T, ActionError>;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("no record found for ID {0}")]
    NotFound(String),

    #[error("permission denied")]
    PermissionDenied,

    /// The record exists but the section asked about is empty.
    #[error("information not available")]
    NotAvailable,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{0}")]
    Validation(String),
}

impl From<StoreError> for ActionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(id) => {
                ActionError::Validation(format!("student_id already exists: {id}"))
            }
            other => ActionError::StoreUnavailable(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StudentFee,
    StudentAttendance,
    StudentResults,
    HostelInfo,
    LibraryInfo,
    CourseInfo,
    PersonalInfo,
    FacultyAdvisorInfo,
    ThesisStatus,
    StudentGet,
    AdminOverview,
    StudentList,
    AddStudent,
    UpdateStudent,
    DeleteStudent,
}

impl Action {
    pub const ALL: [Action; 15] = [
        Action::StudentFee,
        Action::StudentAttendance,
        Action::StudentResults,
        Action::HostelInfo,
        Action::LibraryInfo,
        Action::CourseInfo,
        Action::PersonalInfo,
        Action::FacultyAdvisorInfo,
        Action::ThesisStatus,
        Action::StudentGet,
        Action::AdminOverview,
        Action::StudentList,
        Action::AddStudent,
        Action::UpdateStudent,
        Action::DeleteStudent,
    ];

    /// Sidecar method name.
    pub fn method(self) -> &'static str {
        match self {
            Self::StudentFee => "students.fee",
            Self::StudentAttendance => "students.attendance",
            Self::StudentResults => "students.results",
            Self::HostelInfo => "students.hostel",
            Self::LibraryInfo => "students.library",
            Self::CourseInfo => "students.course",
            Self::PersonalInfo => "students.personal",
            Self::FacultyAdvisorInfo => "students.advisor",
            Self::ThesisStatus => "students.thesis",
            Self::StudentGet => "students.get",
            Self::AdminOverview => "admin.overview",
            Self::StudentList => "students.list",
            Self::AddStudent => "students.add",
            Self::UpdateStudent => "students.update",
            Self::DeleteStudent => "students.delete",
        }
    }

    /// Name the dialogue engine knows the action by.
    pub fn name(self) -> &'static str {
        match self {
            Self::StudentFee => "action_student_fee",
            Self::StudentAttendance => "action_student_attendance",
            Self::StudentResults => "action_student_results",
            Self::HostelInfo => "action_hostel_info",
            Self::LibraryInfo => "action_library_info",
            Self::CourseInfo => "action_course_info",
            Self::PersonalInfo => "action_personal_info",
            Self::FacultyAdvisorInfo => "action_faculty_advisor_info",
            Self::ThesisStatus => "action_thesis_status",
            Self::StudentGet => "action_student_get",
            Self::AdminOverview => "action_admin_overview",
            Self::StudentList => "action_student_list",
            Self::AddStudent => "action_add_student",
            Self::UpdateStudent => "action_update_student",
            Self::DeleteStudent => "action_delete_student",
        }
    }

    /// Accepts either the method or the action name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.method() == s || a.name() == s)
    }
}

/// Per-request slots every action may read.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub actor: ActorContext,
    pub student_id: Option<String>,
}

impl RequestContext {
    pub fn new(actor: ActorContext, student_id: Option<String>) -> Self {
        Self { actor, student_id }
    }

    pub fn target(&self) -> ActionResult<&str> {
        match self.student_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ActionError::Validation("missing student_id".to_string())),
        }
    }
}
