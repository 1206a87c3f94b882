use super::{active_store, respond};
use crate::actions::{admin, Action};
use crate::ipc::slots::Slots;
use crate::ipc::types::{AppState, Request};

fn handle_overview(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match active_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let actor = Slots::new(&req.params).actor();
    respond(req, Action::AdminOverview, admin::admin_overview(store, &actor))
}

fn handle_list(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match active_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let actor = Slots::new(&req.params).actor();
    respond(req, Action::StudentList, admin::student_list(store, &actor))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match Action::parse(&req.method)? {
        Action::AdminOverview => Some(handle_overview(state, req)),
        Action::StudentList => Some(handle_list(state, req)),
        _ => None,
    }
}
