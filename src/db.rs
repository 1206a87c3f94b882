use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE: &str = "erp.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    // One JSON document per student. `student_id` and `level` are lifted out
    // of the body so lookups and the admin counts can use an index.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id TEXT PRIMARY KEY,
            student_id TEXT NOT NULL UNIQUE,
            level TEXT,
            doc TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_level ON students(level)",
        [],
    )?;
    Ok(())
}
