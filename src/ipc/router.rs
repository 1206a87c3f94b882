use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;
use tracing::info_span;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    let span = info_span!("request", id = %req.id, method = %req.method);
    let _enter = span.enter();

    if let Some(resp) = handlers::core::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::queries::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::admin::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::records::try_handle(state, &req) {
        return resp;
    }

    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
