//! Reading the dialogue engine's flat slot map out of `params`.
//!
//! Slot values are loosely typed: numbers often arrive as strings and unset
//! slots as `null`, so every accessor treats `null` like an absent key.

use serde_json::Value;

use crate::actions::records::StudentDraft;
use crate::actions::{ActionError, ActionResult, RequestContext};
use crate::model::{FeeStructure, Level, StudentPatch};
use crate::policy::{ActorContext, Role};

pub struct Slots<'a> {
    params: &'a Value,
}

fn bad(key: &str, expected: &str) -> ActionError {
    ActionError::Validation(format!("{key} must be {expected}"))
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl<'a> Slots<'a> {
    pub fn new(params: &'a Value) -> Self {
        Self { params }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.params.get(key).filter(|v| !v.is_null())
    }

    pub fn str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn integer(&self, key: &str) -> ActionResult<Option<i64>> {
        let Some(v) = self.get(key) else {
            return Ok(None);
        };
        match v {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Some(i));
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
                    _ => Err(bad(key, "a whole number")),
                }
            }
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| bad(key, "a whole number")),
            _ => Err(bad(key, "a whole number")),
        }
    }

    pub fn u32(&self, key: &str) -> ActionResult<Option<u32>> {
        match self.integer(key)? {
            Some(i) => u32::try_from(i)
                .map(Some)
                .map_err(|_| bad(key, "a non-negative whole number")),
            None => Ok(None),
        }
    }

    pub fn i32(&self, key: &str) -> ActionResult<Option<i32>> {
        match self.integer(key)? {
            Some(i) => i32::try_from(i)
                .map(Some)
                .map_err(|_| bad(key, "a whole number")),
            None => Ok(None),
        }
    }

    pub fn f64(&self, key: &str) -> ActionResult<Option<f64>> {
        let Some(v) = self.get(key) else {
            return Ok(None);
        };
        let n = match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => return Ok(None),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match n {
            Some(f) if f.is_finite() => Ok(Some(f)),
            _ => Err(bad(key, "a number")),
        }
    }

    pub fn level(&self, key: &str) -> ActionResult<Option<Level>> {
        match self.str(key) {
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => Level::parse(&s)
                .map(Some)
                .ok_or_else(|| bad(key, "one of Bachelor, Master, Doctorate")),
            None => Ok(None),
        }
    }

    /// An array of strings, or one comma-separated string.
    pub fn string_list(&self, key: &str) -> ActionResult<Option<Vec<String>>> {
        let Some(v) = self.get(key) else {
            return Ok(None);
        };
        match v {
            Value::Array(items) => items
                .iter()
                .map(|i| {
                    i.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| bad(key, "a list of strings"))
                })
                .collect::<ActionResult<Vec<_>>>()
                .map(Some),
            Value::String(s) => Ok(Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            _ => Err(bad(key, "a list of strings")),
        }
    }

    /// An object whose amounts read like any other numeric slot; missing
    /// amounts are 0.
    pub fn fee_structure(&self, key: &str) -> ActionResult<Option<FeeStructure>> {
        let fields = match self.get(key) {
            Some(v) if v.is_object() => Slots::new(v),
            Some(_) => return Err(bad(key, "an object")),
            None => return Ok(None),
        };
        let nested = |e: ActionError| match e {
            ActionError::Validation(msg) => ActionError::Validation(format!("{key}.{msg}")),
            other => other,
        };
        let per_semester_fee = fields.f64("per_semester_fee").map_err(nested)?;
        let paid_till_semester = fields.u32("paid_till_semester").map_err(nested)?;
        let hostel_fee = fields.f64("hostel_fee").map_err(nested)?;
        Ok(Some(FeeStructure {
            per_semester_fee: per_semester_fee.unwrap_or(0.0),
            paid_till_semester: paid_till_semester.unwrap_or(0),
            hostel_fee: hostel_fee.unwrap_or(0.0),
        }))
    }

    fn truthy_str(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| truthy(v))?;
        self.str(key)
    }

    fn truthy_u32(&self, key: &str) -> ActionResult<Option<u32>> {
        if !self.get(key).map(truthy).unwrap_or(false) {
            return Ok(None);
        }
        Ok(self.u32(key)?.filter(|n| *n != 0))
    }

    /// The requester defaults to the target slot, which is how self-service
    /// students are identified when the dispatcher sends a single id.
    pub fn actor(&self) -> ActorContext {
        let role = self.str("role").as_deref().and_then(Role::parse);
        let requester = self.str("requester_id").or_else(|| self.str("student_id"));
        ActorContext::new(role, requester)
    }

    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.actor(), self.str("student_id"))
    }

    pub fn draft(&self) -> ActionResult<StudentDraft> {
        Ok(StudentDraft {
            student_id: self.str("student_id"),
            name: self.str("name"),
            dob: self.str("dob"),
            gender: self.str("gender"),
            email: self.str("email"),
            phone: self.str("phone"),
            address: self.str("address"),
            admission_year: self.i32("admission_year")?,
            course_id: self.str("course_id"),
            course_name: self.str("course_name"),
            level: self.level("level")?,
            duration_years: self.u32("duration_years")?,
            semesters: self.u32("semesters")?,
            current_semester: self.u32("current_semester")?,
            credits_completed: self.u32("credits_completed")?,
            electives: self.string_list("electives")?,
            fee_structure: self.fee_structure("fee_structure")?,
            faculty_advisor: self.str("faculty_advisor"),
            hostel_allocation: self.str("hostel_allocation"),
        })
    }

    /// Only truthy slots make it into the patch; blanks and zeros are skipped.
    pub fn patch(&self) -> ActionResult<StudentPatch> {
        Ok(StudentPatch {
            name: self.truthy_str("name"),
            email: self.truthy_str("email"),
            phone: self.truthy_str("phone"),
            address: self.truthy_str("address"),
            current_semester: self.truthy_u32("current_semester")?,
            credits_completed: self.truthy_u32("credits_completed")?,
        })
    }
}
