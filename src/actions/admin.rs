use super::{ActionError, ActionResult};
use crate::model::{display_value, Level};
use crate::policy::ActorContext;
use crate::store::{Filter, StudentStore};
use serde_json::{Map, Value};
use std::fmt::Write;

const LIST_FIELDS: [&str; 3] = ["student_id", "name", "course_name"];

/// Admin only. The role is checked before the store is touched.
pub fn admin_overview(store: &dyn StudentStore, actor: &ActorContext) -> ActionResult<String> {
    if !actor.is_admin() {
        return Err(ActionError::PermissionDenied);
    }
    let total = store.count(Filter::all())?;
    let bachelors = store.count(Filter::level(Level::Bachelor))?;
    let masters = store.count(Filter::level(Level::Master))?;
    Ok(format!(
        "📊 Admin Dashboard:\n\
         Total Students: {total}\n\
         Bachelor Students: {bachelors}\n\
         Master Students: {masters}"
    ))
}

fn field(doc: &Map<String, Value>, key: &str) -> String {
    doc.get(key)
        .map(display_value)
        .unwrap_or_else(|| "N/A".to_string())
}

/// Admins and teachers; one line per record in store order.
pub fn student_list(store: &dyn StudentStore, actor: &ActorContext) -> ActionResult<String> {
    if !actor.is_staff() {
        return Err(ActionError::PermissionDenied);
    }
    let docs = store.find_many(Some(&LIST_FIELDS[..]))?;
    let mut message = String::from("📋 Student List:\n");
    for doc in &docs {
        let _ = writeln!(
            message,
            "{} - {} ({})",
            field(doc, "student_id"),
            field(doc, "name"),
            field(doc, "course_name")
        );
    }
    Ok(message)
}
