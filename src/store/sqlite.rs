use super::{project, Filter, StoreError, StoreResult, StudentStore};
use crate::model::{StudentPatch, StudentRecord};
use rusqlite::{Connection, ErrorCode, OptionalExtension};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

/// Student documents in the workspace database (see `db::init_schema`).
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        crate::db::init_schema(&conn)?;
        Ok(Self::new(conn))
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation
    )
}

impl StudentStore for SqliteStore {
    fn find_one(&self, student_id: &str) -> StoreResult<Option<StudentRecord>> {
        let doc: Option<String> = self
            .conn
            .query_row(
                "SELECT doc FROM students WHERE student_id = ?",
                [student_id],
                |r| r.get(0),
            )
            .optional()?;
        match doc {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn find_many(&self, projection: Option<&[&str]>) -> StoreResult<Vec<Map<String, Value>>> {
        let mut stmt = self.conn.prepare("SELECT doc FROM students ORDER BY rowid")?;
        let docs = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = Vec::with_capacity(docs.len());
        for text in docs {
            let doc: Map<String, Value> = serde_json::from_str(&text)?;
            out.push(match projection {
                Some(fields) => project(doc, fields),
                None => doc,
            });
        }
        Ok(out)
    }

    fn count(&self, filter: Filter) -> StoreResult<u64> {
        let n: i64 = match filter.level {
            Some(level) => self.conn.query_row(
                "SELECT COUNT(*) FROM students WHERE level = ?",
                [level.as_str()],
                |r| r.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))?,
        };
        Ok(n.max(0) as u64)
    }

    fn insert_one(&self, record: &StudentRecord) -> StoreResult<()> {
        let doc = serde_json::to_string(record)?;
        let now = now_rfc3339();
        let id = Uuid::new_v4().to_string();
        let res = self.conn.execute(
            "INSERT INTO students(id, student_id, level, doc, created_at, updated_at)
             VALUES(?, ?, ?, ?, ?, ?)",
            (
                &id,
                &record.student_id,
                record.level.map(|l| l.as_str()),
                &doc,
                &now,
                &now,
            ),
        );
        match res {
            Ok(_) => {
                debug!(student_id = %record.student_id, doc_id = %id, "inserted student document");
                Ok(())
            }
            Err(e) if is_constraint_violation(&e) => {
                Err(StoreError::Duplicate(record.student_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn update_one(&self, student_id: &str, patch: &StudentPatch) -> StoreResult<u64> {
        let set = patch.to_document();
        if set.is_empty() {
            let n: i64 = self.conn.query_row(
                "SELECT COUNT(*) FROM students WHERE student_id = ?",
                [student_id],
                |r| r.get(0),
            )?;
            return Ok(n.max(0) as u64);
        }

        // json_patch merges top-level keys in place; none of ours are null,
        // so nothing is ever removed from the document.
        let set_json = serde_json::to_string(&Value::Object(set))?;
        let changed = self.conn.execute(
            "UPDATE students
             SET doc = json_patch(doc, ?), updated_at = ?
             WHERE student_id = ?",
            (&set_json, now_rfc3339(), student_id),
        )?;
        debug!(student_id, changed, "patched student document");
        Ok(changed as u64)
    }

    fn delete_one(&self, student_id: &str) -> StoreResult<u64> {
        let deleted = self
            .conn
            .execute("DELETE FROM students WHERE student_id = ?", [student_id])?;
        debug!(student_id, deleted, "deleted student document");
        Ok(deleted as u64)
    }
}
