//! Key/value persistence backends
//!
//! Only cosmetic settings are stored; gameplay state never is.
//! - `MemoryStore`: in-process, for tests and embedding hosts
//! - `FileStore`: one JSON file per key in the platform config dir (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::collections::HashMap;
use std::io;

/// Minimal string key/value store
pub trait KeyValueStore {
    /// Stored value, or `None` when missing or unreadable
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    use directories::ProjectDirs;

    use super::KeyValueStore;

    /// Directory-backed store: `<dir>/<key>.json`
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// Store in the platform config directory
        pub fn default_location() -> io::Result<Self> {
            let project_dirs = ProjectDirs::from("", "", "pillar-flap").ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
            })?;
            Ok(Self::new(project_dirs.config_dir()))
        }

        pub(crate) fn path_for(&self, key: &str) -> PathBuf {
            // Keys are internal constants; keep file names tame anyway
            let name: String = key
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            self.dir.join(format!("{name}.json"))
        }
    }

    impl KeyValueStore for FileStore {
        fn read(&self, key: &str) -> Option<String> {
            fs::read_to_string(self.path_for(key)).ok()
        }

        fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            // Replace atomically via a temp file
            let path = self.path_for(key);
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, value)?;
            fs::rename(&tmp, &path)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use std::io;

    use super::KeyValueStore;

    /// Browser LocalStorage
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl KeyValueStore for LocalStorageStore {
        fn read(&self, key: &str) -> Option<String> {
            Self::storage()?.get_item(key).ok()?
        }

        fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
            let storage = Self::storage().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "LocalStorage unavailable")
            })?;
            storage
                .set_item(key, value)
                .map_err(|_| io::Error::other("LocalStorage write rejected"))
        }
    }
}

/// Store used by `Settings::load`/`Settings::save` on this platform
#[cfg(not(target_arch = "wasm32"))]
pub fn platform_store() -> io::Result<FileStore> {
    FileStore::default_location()
}

#[cfg(target_arch = "wasm32")]
pub fn platform_store() -> io::Result<LocalStorageStore> {
    Ok(LocalStorageStore)
}
