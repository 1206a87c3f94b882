use super::{ActionError, ActionResult, RequestContext};
use crate::model::{display_value, or_placeholder, LibraryAccess, SemesterTable, StudentRecord};
use crate::store::StudentStore;
use std::fmt::Write;
use tracing::debug;

/// Looks the target up, then checks the actor may see it. The order matters:
/// an unknown id is reported as such even to actors who could not view it.
pub(crate) fn load_visible(
    store: &dyn StudentStore,
    ctx: &RequestContext,
) -> ActionResult<StudentRecord> {
    let target = ctx.target()?;
    let Some(record) = store.find_one(target)? else {
        return Err(ActionError::NotFound(target.to_string()));
    };
    if !ctx.actor.may_access(target) {
        debug!(
            student_id = target,
            role = ctx.actor.role.map(|r| r.as_str()).unwrap_or("unknown"),
            "record access denied"
        );
        return Err(ActionError::PermissionDenied);
    }
    Ok(record)
}

pub fn student_fee(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    let fee = student.fee_structure;
    let total_due = fee.total_due(student.semesters.unwrap_or(0));
    Ok(format!(
        "💰 {}'s fee status:\n\
         Paid till semester: {}\n\
         Per Semester Fee: {}\n\
         Hostel Fee: {}\n\
         Total Due: {}",
        student.name, fee.paid_till_semester, fee.per_semester_fee, fee.hostel_fee, total_due
    ))
}

fn semester_listing(heading: &str, table: &SemesterTable) -> String {
    let mut message = format!("{heading}\n");
    for (sem, value) in table {
        let _ = writeln!(message, "{}: {}", sem, display_value(value));
    }
    message
}

pub fn student_attendance(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    if student.attendance.is_empty() {
        return Err(ActionError::NotAvailable);
    }
    Ok(semester_listing(
        &format!("📊 Attendance for {}:", student.name),
        &student.attendance,
    ))
}

pub fn student_results(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    if student.results.is_empty() {
        return Err(ActionError::NotAvailable);
    }
    Ok(semester_listing(
        &format!("📝 Results for {}:", student.name),
        &student.results,
    ))
}

pub fn hostel_info(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    let hostel = or_placeholder(Some(student.hostel_allocation.as_str()), "Not Allocated");
    Ok(format!("🏨 {}'s hostel: {}", student.name, hostel))
}

pub fn library_info(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    let access = student.library_access.unwrap_or(LibraryAccess::Inactive);
    Ok(format!(
        "📚 {}'s library access: {}",
        student.name,
        access.as_str()
    ))
}

pub fn course_info(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    let course = or_placeholder(student.course_name.as_deref(), "N/A");
    let level = student.level.map(|l| l.as_str()).unwrap_or("N/A");
    Ok(format!(
        "🎓 {} is enrolled in {} ({})\n\
         Duration: {} years | Semesters: {}\n\
         Current Semester: {} | Credits Completed: {}\n\
         Electives: {}",
        student.name,
        course,
        level,
        student.duration_years.unwrap_or(0),
        student.semesters.unwrap_or(0),
        student.current_semester.unwrap_or(0),
        student.credits_completed.unwrap_or(0),
        student.electives.join(", ")
    ))
}

pub fn personal_info(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    Ok(format!(
        "👤 {} | DOB: {} | Email: {} | Phone: {} | Address: {}",
        student.name,
        or_placeholder(student.dob.as_deref(), "N/A"),
        or_placeholder(student.email.as_deref(), "N/A"),
        or_placeholder(student.phone.as_deref(), "N/A"),
        or_placeholder(student.address.as_deref(), "N/A"),
    ))
}

pub fn faculty_advisor_info(
    store: &dyn StudentStore,
    ctx: &RequestContext,
) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    Ok(format!(
        "👨‍🏫 {}'s faculty advisor: {}",
        student.name,
        or_placeholder(Some(student.faculty_advisor.as_str()), "N/A")
    ))
}

pub fn thesis_status(store: &dyn StudentStore, ctx: &RequestContext) -> ActionResult<String> {
    let student = load_visible(store, ctx)?;
    let Some(thesis) = student.thesis else {
        return Err(ActionError::NotAvailable);
    };
    Ok(format!(
        "📌 Thesis Title: {} | Status: {}",
        or_placeholder(thesis.title.as_deref(), "N/A"),
        or_placeholder(thesis.status.as_deref(), "Not Started"),
    ))
}
