mod error;
mod handlers;
mod messages;
mod router;
mod slots;
mod types;

pub use router::handle_request;
pub use types::{AppState, Request};
