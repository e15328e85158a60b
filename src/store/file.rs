use super::{Store, StoreError};
use std::path::{Path, PathBuf};

/// Store backed by a single TOML table on disk.
///
/// The file is read once when opened and rewritten in full on every
/// [`Store::set`]. A missing file starts empty; an unreadable or corrupt
/// one also starts empty after logging a warning.
pub struct FileStore {
    path: PathBuf,
    table: toml::Table,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = match read_table(&path) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "starting with empty raffle state");
                toml::Table::new()
            }
        };
        Self { path, table }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(&self.table)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

fn read_table(path: &Path) -> Result<toml::Table, StoreError> {
    if !path.exists() {
        return Ok(toml::Table::new());
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<toml::Value> {
        self.table.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: toml::Value) -> Result<(), StoreError> {
        self.table.insert(key.to_string(), value);
        self.flush()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.table.clear();
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raffle::history::HistoryEntry;
    use crate::store::{load, save, KEY_DIGIT_COUNT, KEY_HISTORY};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tombola-test-{}-{}", std::process::id(), name))
            .join("state.toml")
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        let _ = std::fs::remove_file(&path);

        let entries = vec![HistoryEntry {
            id: 1_700_000_000_000,
            number: "042".into(),
            timestamp: "12:00:01".into(),
            winner_name: "Ana".into(),
        }];
        {
            let mut store = FileStore::open(&path);
            save(&mut store, KEY_DIGIT_COUNT, &4u8);
            save(&mut store, KEY_HISTORY, &entries);
        }

        let store = FileStore::open(&path);
        assert_eq!(load(&store, KEY_DIGIT_COUNT, 3u8), 4);
        assert_eq!(load(&store, KEY_HISTORY, Vec::<HistoryEntry>::new()), entries);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "this is = = not toml").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(load(&store, KEY_DIGIT_COUNT, 3u8), 3);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_clear_empties_file() {
        let path = temp_path("clear");
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::open(&path);
        save(&mut store, KEY_DIGIT_COUNT, &5u8);
        store.clear().unwrap();

        let reopened = FileStore::open(&path);
        assert!(reopened.get(KEY_DIGIT_COUNT).is_none());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
