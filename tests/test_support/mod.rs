#![allow(dead_code)]

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

pub struct Sidecar {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

impl Sidecar {
    pub fn spawn() -> Self {
        Self::spawn_with_args(&[])
    }

    pub fn spawn_with_args(args: &[&str]) -> Self {
        let exe = env!("CARGO_BIN_EXE_erpd");
        let mut child = Command::new(exe)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn erpd");
        let stdin = child.stdin.take().expect("child stdin");
        let stdout = child.stdout.take().expect("child stdout");
        Self {
            child,
            stdin,
            reader: BufReader::new(stdout),
        }
    }

    /// Spawns a sidecar with a fresh workspace already selected.
    pub fn with_workspace(prefix: &str) -> (Self, PathBuf) {
        let workspace = temp_dir(prefix);
        let mut sidecar = Self::spawn();
        sidecar.select_workspace(&workspace);
        (sidecar, workspace)
    }

    pub fn select_workspace(&mut self, path: &Path) {
        let _ = self.request_ok(
            "ws",
            "workspace.select",
            json!({ "path": path.to_string_lossy() }),
        );
    }

    pub fn send_line(&mut self, line: &str) -> serde_json::Value {
        self.send_raw(line.as_bytes())
    }

    /// Writes `bytes` plus a newline and reads one reply line.
    pub fn send_raw(&mut self, bytes: &[u8]) -> serde_json::Value {
        self.stdin.write_all(bytes).expect("write request");
        self.stdin.write_all(b"\n").expect("write newline");
        self.stdin.flush().expect("flush request");

        let mut out = String::new();
        self.reader.read_line(&mut out).expect("read response line");
        assert!(
            !out.trim().is_empty(),
            "empty response for {}",
            String::from_utf8_lossy(bytes)
        );
        serde_json::from_str(out.trim()).expect("parse response json")
    }

    pub fn request(
        &mut self,
        id: &str,
        method: &str,
        params: serde_json::Value,
    ) -> serde_json::Value {
        let payload = json!({
            "id": id,
            "method": method,
            "params": params,
        });
        let value = self.send_line(&payload.to_string());
        assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
        value
    }

    pub fn request_ok(
        &mut self,
        id: &str,
        method: &str,
        params: serde_json::Value,
    ) -> serde_json::Value {
        let value = self.request(id, method, params);
        assert!(
            value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
            "{} failed: {}",
            method,
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error")
        );
        value.get("result").cloned().unwrap_or_else(|| json!({}))
    }

    /// Sends a request expected to fail and returns `(code, message)`.
    pub fn request_err(
        &mut self,
        id: &str,
        method: &str,
        params: serde_json::Value,
    ) -> (String, String) {
        let value = self.request(id, method, params);
        assert_eq!(
            value.get("ok").and_then(|v| v.as_bool()),
            Some(false),
            "{} unexpectedly succeeded: {}",
            method,
            value
        );
        let error = value.get("error").cloned().unwrap_or_default();
        let code = error
            .get("code")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let message = error
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        (code, message)
    }

    /// Convenience for reading the reply text of a successful action.
    pub fn text(&mut self, id: &str, method: &str, params: serde_json::Value) -> String {
        self.request_ok(id, method, params)
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

impl Drop for Sidecar {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Admin `students.add` parameters for a typical bachelor enrolment.
pub fn bachelor(student_id: &str, name: &str) -> serde_json::Value {
    json!({
        "role": "admin",
        "student_id": student_id,
        "name": name,
        "email": format!("{}@uni.edu", student_id.to_lowercase()),
        "course_name": "Computer Science",
        "level": "Bachelor",
        "duration_years": 4,
        "semesters": 8,
        "current_semester": 5,
        "credits_completed": 96,
        "electives": ["AI", "Networks"],
        "fee_structure": {
            "per_semester_fee": 1000,
            "paid_till_semester": 4,
            "hostel_fee": 500
        },
        "hostel_allocation": "Block A-12",
        "faculty_advisor": "Dr. Rao"
    })
}
