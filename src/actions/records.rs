use super::queries::load_visible;
use super::{ActionError, ActionResult, RequestContext};
use crate::model::{
    or_placeholder, FeeStructure, Level, LibraryAccess, SemesterTable, StudentPatch, StudentRecord,
};
use crate::policy::ActorContext;
use crate::store::StudentStore;
use tracing::info;

/// Fields an administrator supplies when enrolling a student. Everything is
/// optional here; `into_record` enforces what a stored record needs.
#[derive(Debug, Clone, Default)]
pub struct StudentDraft {
    pub student_id: Option<String>,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub admission_year: Option<i32>,
    pub course_id: Option<String>,
    pub course_name: Option<String>,
    pub level: Option<Level>,
    pub duration_years: Option<u32>,
    pub semesters: Option<u32>,
    pub current_semester: Option<u32>,
    pub credits_completed: Option<u32>,
    pub electives: Option<Vec<String>>,
    pub fee_structure: Option<FeeStructure>,
    pub faculty_advisor: Option<String>,
    pub hostel_allocation: Option<String>,
}

fn required(v: Option<String>, key: &str) -> ActionResult<String> {
    match v.map(|s| s.trim().to_string()) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ActionError::Validation(format!("missing {key}"))),
    }
}

impl StudentDraft {
    /// New enrolments start with empty academic history and active library
    /// access.
    pub fn into_record(self) -> ActionResult<StudentRecord> {
        Ok(StudentRecord {
            student_id: required(self.student_id, "student_id")?,
            name: required(self.name, "name")?,
            dob: self.dob,
            gender: self.gender,
            email: self.email,
            phone: self.phone,
            address: self.address,
            admission_year: self.admission_year,
            course_id: self.course_id,
            course_name: self.course_name,
            level: self.level,
            duration_years: self.duration_years,
            semesters: self.semesters,
            current_semester: self.current_semester,
            credits_completed: self.credits_completed,
            electives: self.electives.unwrap_or_default(),
            attendance: SemesterTable::new(),
            results: SemesterTable::new(),
            thesis: None,
            fee_structure: self.fee_structure.unwrap_or_default(),
            hostel_allocation: self.hostel_allocation.unwrap_or_default(),
            library_access: Some(LibraryAccess::Active),
            faculty_advisor: self.faculty_advisor.unwrap_or_default(),
        })
    }
}

/// Full record plus a one-line summary, under the same rules as the queries.
pub fn student_get(
    store: &dyn StudentStore,
    ctx: &RequestContext,
) -> ActionResult<(String, StudentRecord)> {
    let student = load_visible(store, ctx)?;
    let text = format!(
        "🪪 {} ({}) | {} ({}) | Semester {}",
        student.name,
        student.student_id,
        or_placeholder(student.course_name.as_deref(), "N/A"),
        student.level.map(|l| l.as_str()).unwrap_or("N/A"),
        student.current_semester.unwrap_or(0),
    );
    Ok((text, student))
}

pub fn add_student(
    store: &dyn StudentStore,
    actor: &ActorContext,
    draft: StudentDraft,
) -> ActionResult<String> {
    if !actor.is_admin() {
        return Err(ActionError::PermissionDenied);
    }
    let record = draft.into_record()?;
    store.insert_one(&record)?;
    info!(student_id = %record.student_id, "student added");
    Ok(format!("✅ Student {} added successfully!", record.name))
}

pub fn update_student(
    store: &dyn StudentStore,
    ctx: &RequestContext,
    patch: &StudentPatch,
) -> ActionResult<String> {
    if !ctx.actor.is_admin() {
        return Err(ActionError::PermissionDenied);
    }
    let student_id = ctx.target()?;
    if store.update_one(student_id, patch)? == 0 {
        return Err(ActionError::NotFound(student_id.to_string()));
    }
    info!(student_id, fields = patch.to_document().len(), "student updated");
    Ok(format!("✅ Student {student_id} updated successfully!"))
}

pub fn delete_student(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    if !ctx.actor.is_admin() {
        return Err(ActionError::PermissionDenied);
    }
    let student_id = ctx.target()?;
    if store.delete_one(student_id)? == 0 {
        return Err(ActionError::NotFound(student_id.to_string()));
    }
    info!(student_id, "student deleted");
    Ok(format!("✅ Student {student_id} deleted successfully!"))
}
