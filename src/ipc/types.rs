use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::db;
use crate::store::{SqliteStore, StudentStore};

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Default)]
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: Option<Box<dyn StudentStore>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (creating if needed) the workspace database and makes it the
    /// active store. On failure the previous store stays active.
    pub fn open_workspace(&mut self, path: &Path) -> anyhow::Result<()> {
        let conn = db::open_db(path)?;
        self.store = Some(Box::new(SqliteStore::new(conn)));
        self.workspace = Some(path.to_path_buf());
        info!(workspace = %path.display(), "workspace opened");
        Ok(())
    }
}
