mod test_support;

use serde_json::json;
use test_support::{bachelor, Sidecar};

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut sidecar, workspace) = Sidecar::with_workspace("erpd-router-smoke");

    let health = sidecar.request_ok("1", "health", json!({}));
    assert_eq!(
        health.get("workspacePath").and_then(|v| v.as_str()),
        Some(workspace.to_string_lossy().as_ref())
    );
    assert!(workspace.join("erp.sqlite3").is_file());

    let _ = sidecar.request_ok("2", "students.add", bachelor("S1", "Asha"));

    let student = json!({ "role": "student", "student_id": "S1" });
    for (i, method) in [
        "students.fee",
        "students.hostel",
        "students.library",
        "students.course",
        "students.personal",
        "students.advisor",
        "students.get",
    ]
    .iter()
    .enumerate()
    {
        let res = sidecar.request_ok(&format!("q{i}"), method, student.clone());
        assert!(res.get("action").and_then(|v| v.as_str()).is_some());
        assert!(res.get("text").and_then(|v| v.as_str()).is_some());
    }

    for (i, method) in ["students.attendance", "students.results", "students.thesis"]
        .iter()
        .enumerate()
    {
        let (code, _) = sidecar.request_err(&format!("na{i}"), method, student.clone());
        assert_eq!(code, "not_available", "{method}");
    }

    let admin = json!({ "role": "admin" });
    let _ = sidecar.request_ok("3", "admin.overview", admin.clone());
    let _ = sidecar.request_ok("4", "students.list", admin);
    let _ = sidecar.request_ok(
        "5",
        "students.update",
        json!({ "role": "admin", "student_id": "S1", "phone": "555-0101" }),
    );
    let _ = sidecar.request_ok(
        "6",
        "students.delete",
        json!({ "role": "admin", "student_id": "S1" }),
    );
}

#[test]
fn unknown_methods_are_not_implemented() {
    let mut sidecar = Sidecar::spawn();
    let (code, message) = sidecar.request_err("1", "students.teleport", json!({}));
    assert_eq!(code, "not_implemented");
    assert!(message.contains("students.teleport"));
}

#[test]
fn unparseable_lines_get_bad_json_and_the_loop_keeps_going() {
    let mut sidecar = Sidecar::spawn();
    let resp = sidecar.send_line("{ this is not json");
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        resp.get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("bad_json")
    );

    let health = sidecar.request_ok("2", "health", json!({}));
    assert!(health.get("version").and_then(|v| v.as_str()).is_some());
}

#[test]
fn invalid_utf8_lines_get_bad_json_and_later_requests_are_served() {
    let mut sidecar = Sidecar::spawn();
    let resp = sidecar.send_raw(
        b"{\"id\":\"1\",\"method\":\"health\",\"params\":{\"x\":\"\xff\"}}",
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        resp.get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("bad_json")
    );

    let health = sidecar.request_ok("2", "health", json!({}));
    assert!(health.get("version").and_then(|v| v.as_str()).is_some());
}

#[test]
fn actions_before_workspace_select_report_no_workspace() {
    let mut sidecar = Sidecar::spawn();
    let health = sidecar.request_ok("1", "health", json!({}));
    assert!(health.get("workspacePath").map(|v| v.is_null()).unwrap_or(false));

    let (code, _) = sidecar.request_err(
        "2",
        "students.fee",
        json!({ "role": "admin", "student_id": "S1" }),
    );
    assert_eq!(code, "no_workspace");

    let (code, _) = sidecar.request_err("3", "workspace.select", json!({}));
    assert_eq!(code, "bad_params");
}

#[test]
fn action_names_are_accepted_as_methods() {
    let (mut sidecar, _workspace) = Sidecar::with_workspace("erpd-action-names");
    let added = sidecar.request_ok("1", "action_add_student", bachelor("S1", "Asha"));
    assert_eq!(
        added.get("action").and_then(|v| v.as_str()),
        Some("action_add_student")
    );

    let text = sidecar.text(
        "2",
        "action_library_info",
        json!({ "role": "teacher", "student_id": "S1" }),
    );
    assert_eq!(text, "📚 Asha's library access: Active");
}
