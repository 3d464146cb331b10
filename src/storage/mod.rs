use anyhow::Context;
use rusqlite::{Connection, params};
use std::path::Path;

/// Flat key-value persistence over a SQLite file.
///
/// The library lives under a single key as one JSON array; there are no
/// partial writes, every save rewrites the whole value.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory db")?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS kv (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL,
  updated_at INTEGER NOT NULL
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key=?1")
            .context("prepare kv get")?;
        let mut rows = stmt.query(params![key]).context("query kv get")?;
        if let Some(row) = rows.next().context("read kv row")? {
            let value: String = row.get(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.conn
            .execute(
                r#"
INSERT INTO kv(key, value, updated_at)
VALUES(?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET
  value=excluded.value,
  updated_at=excluded.updated_at
"#,
                params![key, value, now],
            )
            .context("kv set")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.get("library.saved_songs").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set("library.saved_songs", "[]").unwrap();
        assert_eq!(
            storage.get("library.saved_songs").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_set_overwrites() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
    }
}
