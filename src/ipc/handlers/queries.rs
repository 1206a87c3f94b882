use super::{active_store, respond};
use crate::actions::{queries, Action, ActionResult, RequestContext};
use crate::ipc::slots::Slots;
use crate::ipc::types::{AppState, Request};
use crate::store::StudentStore;

type QueryFn = fn(&dyn StudentStore, &RequestContext) -> ActionResult<String>;

fn query_for(action: Action) -> Option<QueryFn> {
    let f: QueryFn = match action {
        Action::StudentFee => queries::student_fee,
        Action::StudentAttendance => queries::student_attendance,
        Action::StudentResults => queries::student_results,
        Action::HostelInfo => queries::hostel_info,
        Action::LibraryInfo => queries::library_info,
        Action::CourseInfo => queries::course_info,
        Action::PersonalInfo => queries::personal_info,
        Action::FacultyAdvisorInfo => queries::faculty_advisor_info,
        Action::ThesisStatus => queries::thesis_status,
        _ => return None,
    };
    Some(f)
}

fn handle_query(
    state: &AppState,
    req: &Request,
    action: Action,
    run: QueryFn,
) -> serde_json::Value {
    let store = match active_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let ctx = Slots::new(&req.params).request_context();
    respond(req, action, run(store, &ctx))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = Action::parse(&req.method)?;
    let run = query_for(action)?;
    Some(handle_query(state, req, action, run))
}
