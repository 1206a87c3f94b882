pub mod admin;
pub mod core;
pub mod queries;
pub mod records;

use crate::actions::{Action, ActionError, ActionResult};
use crate::ipc::error::{err, ok};
use crate::ipc::messages;
use crate::ipc::types::{AppState, Request};
use crate::store::StudentStore;
use serde_json::json;
use tracing::{debug, warn};

/// The active store, or the `no_workspace` reply to send instead.
fn active_store<'s>(
    state: &'s AppState,
    req: &Request,
) -> Result<&'s dyn StudentStore, serde_json::Value> {
    state
        .store
        .as_deref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

fn failure(req: &Request, action: Action, e: &ActionError) -> serde_json::Value {
    match e {
        ActionError::StoreUnavailable(detail) => {
            warn!(action = action.name(), detail = %detail, "store failure")
        }
        other => debug!(action = action.name(), outcome = %other, "action refused"),
    }
    err(
        &req.id,
        messages::code(e),
        messages::render(action, e),
        Some(json!({ "action": action.name() })),
    )
}

fn respond(req: &Request, action: Action, outcome: ActionResult<String>) -> serde_json::Value {
    match outcome {
        Ok(text) => ok(&req.id, json!({ "action": action.name(), "text": text })),
        Err(e) => failure(req, action, &e),
    }
}
