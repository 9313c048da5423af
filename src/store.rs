use crate::snapshot::EditorSnapshot;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Mutex;
use std::{env, fs};

const STATE_FILE: &str = ".minipen_state.json";

/// Persistence capability for the single snapshot slot. Loading never fails:
/// anything short of a well-formed payload degrades to starter defaults.
pub trait SnapshotStore {
    fn load(&self) -> EditorSnapshot;
    fn save(&self, snapshot: &EditorSnapshot) -> Result<(), Box<dyn Error>>;
}

/// One JSON file under `$HOME`, overwritten whole on every save.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        let path = if let Ok(home) = env::var("HOME") {
            PathBuf::from(home).join(STATE_FILE)
        } else {
            PathBuf::from(STATE_FILE)
        };
        Self { path }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> EditorSnapshot {
        match fs::read_to_string(&self.path) {
            Ok(content) => EditorSnapshot::from_json(&content),
            Err(e) => {
                if self.path.exists() {
                    log::warn!("state file unreadable ({}), starting from defaults", e);
                }
                EditorSnapshot::default()
            }
        }
    }

    fn save(&self, snapshot: &EditorSnapshot) -> Result<(), Box<dyn Error>> {
        let json = snapshot.to_json()?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory slot for tests and embedding.
#[derive(Default)]
pub struct MemStore {
    slot: Mutex<Option<String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with a raw payload, well-formed or not.
    pub fn seeded(raw: &str) -> Self {
        Self {
            slot: Mutex::new(Some(raw.to_string())),
        }
    }
}

impl SnapshotStore for MemStore {
    fn load(&self) -> EditorSnapshot {
        match self.slot.lock() {
            Ok(guard) => match guard.as_deref() {
                Some(raw) => EditorSnapshot::from_json(raw),
                None => EditorSnapshot::default(),
            },
            Err(_) => EditorSnapshot::default(),
        }
    }

    fn save(&self, snapshot: &EditorSnapshot) -> Result<(), Box<dyn Error>> {
        let json = snapshot.to_json()?;
        *self.slot.lock().map_err(|_| "store slot poisoned")? = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Layout;
    use tempfile::TempDir;

    #[test]
    fn test_load_with_no_state_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(temp_dir.path().join("absent.json"));
        assert_eq!(store.load(), EditorSnapshot::default());
    }

    #[test]
    fn test_load_with_malformed_state_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, "{{{ definitely not json").unwrap();
        let store = FileStore::at(path);
        assert_eq!(store.load(), EditorSnapshot::default());
    }

    #[test]
    fn test_save_then_load_round_trips_every_field() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(temp_dir.path().join("state.json"));
        let snap = EditorSnapshot {
            html: "<div class=\"a\">\nüñíçødé 😀</div>".to_string(),
            css: "div{content:'\\''}".to_string(),
            js: "let s = \"multi\\nline\";".to_string(),
            autorun: true,
            layout: Layout::Stacked,
        };
        store.save(&snap).unwrap();
        assert_eq!(store.load(), snap);
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let store = MemStore::new();
        let mut snap = EditorSnapshot::default();
        snap.html = "first".to_string();
        store.save(&snap).unwrap();
        snap.html = "second".to_string();
        store.save(&snap).unwrap();
        assert_eq!(store.load().html, "second");
    }

    #[test]
    fn test_mem_store_seeded_with_garbage_degrades() {
        let store = MemStore::seeded("null");
        assert_eq!(store.load(), EditorSnapshot::default());
    }
}
