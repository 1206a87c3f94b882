use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Semester label to percentage / grade, kept in insertion order.
pub type SemesterTable = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Bachelor,
    Master,
    Doctorate,
}

impl Level {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bachelor" => Some(Self::Bachelor),
            "master" => Some(Self::Master),
            "doctorate" => Some(Self::Doctorate),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bachelor => "Bachelor",
            Self::Master => "Master",
            Self::Doctorate => "Doctorate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryAccess {
    Active,
    Inactive,
}

impl LibraryAccess {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thesis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Missing amounts deserialize as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeStructure {
    pub per_semester_fee: f64,
    pub paid_till_semester: u32,
    pub hostel_fee: f64,
}

impl FeeStructure {
    /// Outstanding amount for a programme of `semesters` semesters.
    ///
    /// The paid-to-date term adds the hostel fee once more whenever at least
    /// one semester has been paid. Finance reconciles against this exact
    /// figure, so it must not be "simplified".
    pub fn total_due(&self, semesters: u32) -> f64 {
        let billed = f64::from(semesters) * self.per_semester_fee + self.hostel_fee;
        let paid = if self.paid_till_semester > 0 {
            f64::from(self.paid_till_semester) * self.per_semester_fee + self.hostel_fee
        } else {
            0.0
        };
        (billed - paid).max(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semesters: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_semester: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_completed: Option<u32>,
    #[serde(default)]
    pub electives: Vec<String>,

    #[serde(default)]
    pub attendance: SemesterTable,
    #[serde(default)]
    pub results: SemesterTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thesis: Option<Thesis>,

    #[serde(default)]
    pub fee_structure: FeeStructure,
    #[serde(default)]
    pub hostel_allocation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_access: Option<LibraryAccess>,
    #[serde(default)]
    pub faculty_advisor: String,
}

/// Partial update over the fields an administrator may edit in place.
/// `None` means "leave unchanged"; there is no way to clear a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub current_semester: Option<u32>,
    pub credits_completed: Option<u32>,
}

impl StudentPatch {
    /// The `$set`-style document holding only the fields to write.
    pub fn to_document(&self) -> Map<String, Value> {
        let mut doc = Map::new();
        let strings = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (key, value) in strings {
            if let Some(v) = value {
                doc.insert(key.to_string(), Value::String(v.clone()));
            }
        }
        if let Some(v) = self.current_semester {
            doc.insert("current_semester".to_string(), Value::from(v));
        }
        if let Some(v) = self.credits_completed {
            doc.insert("credits_completed".to_string(), Value::from(v));
        }
        doc
    }
}

/// Renders a semester table value the way a person would type it:
/// strings without quotes, numbers as-is.
pub fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

/// Treats a missing or blank text field as absent.
pub fn or_placeholder<'a>(v: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => placeholder,
    }
}
