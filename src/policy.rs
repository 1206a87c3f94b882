//! Role-based access to student records.
//!
//! Roles arrive already resolved from the dispatcher; nothing here
//! authenticates anyone.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Unknown role names yield `None`, which the policy always denies.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

/// May an actor holding `role` view or modify the record `target_id`?
pub fn is_allowed(role: Option<Role>, target_id: &str, requester_id: Option<&str>) -> bool {
    match role {
        Some(Role::Admin) | Some(Role::Teacher) => true,
        Some(Role::Student) => requester_id == Some(target_id),
        None => false,
    }
}

/// Who is asking, per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    pub role: Option<Role>,
    /// The actor's own student id; only meaningful for students.
    pub requester_id: Option<String>,
}

impl ActorContext {
    pub fn new(role: Option<Role>, requester_id: Option<String>) -> Self {
        Self { role, requester_id }
    }

    pub fn may_access(&self, target_id: &str) -> bool {
        is_allowed(self.role, target_id, self.requester_id.as_deref())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, Some(Role::Admin) | Some(Role::Teacher))
    }
}
