mod actions;
mod config;
mod db;
mod ipc;
mod model;
mod policy;
mod store;

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

fn main() {
    let args = config::Args::parse();
    config::init_logging(&args);

    let mut state = ipc::AppState::new();
    if let Some(path) = &args.workspace {
        // Keep serving: the dispatcher can still pick another workspace.
        if let Err(e) = state.open_workspace(path) {
            error!(workspace = %path.display(), error = ?e, "could not open workspace");
        }
    }
    info!(version = env!("CARGO_PKG_VERSION"), "erpd ready");

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut buf = Vec::new();

    loop {
        match stdin.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "stdin read failed");
                break;
            }
        }

        let resp = match String::from_utf8(std::mem::take(&mut buf)) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => match serde_json::from_str::<ipc::Request>(&line) {
                Ok(req) => ipc::handle_request(&mut state, req),
                Err(e) => bad_json(e.to_string()),
            },
            Err(e) => bad_json(format!("request line is not UTF-8: {e}")),
        };

        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    info!("stdin closed, shutting down");
}

/// Reply for a line that is not a request. Can't reply with an id.
fn bad_json(message: String) -> serde_json::Value {
    warn!(error = %message, "unparseable request line");
    serde_json::json!({
        "ok": false,
        "error": { "code": "bad_json", "message": message }
    })
}
