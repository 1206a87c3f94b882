use super::{active_store, failure, respond};
use crate::actions::{records, Action, ActionError};
use crate::ipc::error::ok;
use crate::ipc::slots::Slots;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_get(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match active_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let ctx = Slots::new(&req.params).request_context();
    match records::student_get(store, &ctx) {
        Ok((text, record)) => ok(
            &req.id,
            json!({
                "action": Action::StudentGet.name(),
                "text": text,
                "record": record,
            }),
        ),
        Err(e) => failure(req, Action::StudentGet, &e),
    }
}

fn handle_add(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match active_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let slots = Slots::new(&req.params);
    let actor = slots.actor();
    // Role before slot parsing: non-admins get a denial, not a slot error.
    let outcome = if actor.is_admin() {
        slots
            .draft()
            .and_then(|draft| records::add_student(store, &actor, draft))
    } else {
        Err(ActionError::PermissionDenied)
    };
    respond(req, Action::AddStudent, outcome)
}

fn handle_update(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match active_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let slots = Slots::new(&req.params);
    let ctx = slots.request_context();
    let outcome = if ctx.actor.is_admin() {
        slots
            .patch()
            .and_then(|patch| records::update_student(store, &ctx, &patch))
    } else {
        Err(ActionError::PermissionDenied)
    };
    respond(req, Action::UpdateStudent, outcome)
}

fn handle_delete(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match active_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let ctx = Slots::new(&req.params).request_context();
    respond(req, Action::DeleteStudent, records::delete_student(store, &ctx))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match Action::parse(&req.method)? {
        Action::StudentGet => Some(handle_get(state, req)),
        Action::AddStudent => Some(handle_add(state, req)),
        Action::UpdateStudent => Some(handle_update(state, req)),
        Action::DeleteStudent => Some(handle_delete(state, req)),
        _ => None,
    }
}
