use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use taskdeck_application::SessionStore;
use taskdeck_core::StorageError;
use taskdeck_domain::SessionRecord;
use tracing::debug;

/// Session store persisting the record as a JSON file named after the
/// storage key.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store writing `<directory>/<key>.json`.
    #[must_use]
    pub fn new(directory: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: directory.as_ref().join(format!("{key}.json")),
        }
    }

    /// Returns the file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(StorageError::Io(format!(
                    "failed to read '{}': {error}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|error| StorageError::Corrupt(error.to_string()))
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                StorageError::Io(format!(
                    "failed to create '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        let encoded = serde_json::to_vec(record)
            .map_err(|error| StorageError::Io(format!("failed to encode session: {error}")))?;

        // Staged write; the rename replaces the previous record in one step.
        let staging = self.path.with_extension("json.tmp");
        write_private(&staging, &encoded).map_err(|error| {
            StorageError::Io(format!("failed to write '{}': {error}", staging.display()))
        })?;
        fs::rename(&staging, &self.path).map_err(|error| {
            StorageError::Io(format!(
                "failed to replace '{}': {error}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), "persisted session record");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Io(format!(
                "failed to remove '{}': {error}",
                self.path.display()
            ))),
        }
    }
}

/// Writes `contents` to a fresh file readable only by the owner.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    // Creation mode does not apply to an existing file, so a leftover from an
    // interrupted save is removed first.
    if let Err(error) = fs::remove_file(path)
        && error.kind() != ErrorKind::NotFound
    {
        return Err(error);
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use taskdeck_application::SessionStore;
    use taskdeck_core::{Role, StorageError, UserId, UserIdentity};
    use taskdeck_domain::{CredentialBundle, SessionRecord};

    use super::FileSessionStore;

    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            Self(std::env::temp_dir().join(format!("taskdeck-test-{}", uuid::Uuid::new_v4())))
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn record() -> SessionRecord {
        SessionRecord::new(
            CredentialBundle::new("a", "r"),
            UserIdentity::new(UserId::new(1), "u", Role::Manager),
        )
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = ScratchDir::new();
        let store = FileSessionStore::new(&dir.0, "authState");
        assert_eq!(store.load(), Ok(None));
    }

    #[test]
    fn saved_record_loads_back() -> Result<(), StorageError> {
        let dir = ScratchDir::new();
        let store = FileSessionStore::new(&dir.0, "authState");

        store.save(&record())?;

        assert!(store.path().ends_with("authState.json"));
        assert_eq!(store.load()?, Some(record()));
        Ok(())
    }

    #[test]
    fn garbage_file_is_reported_corrupt() -> Result<(), StorageError> {
        let dir = ScratchDir::new();
        let store = FileSessionStore::new(&dir.0, "authState");
        fs::create_dir_all(&dir.0).map_err(|error| StorageError::Io(error.to_string()))?;
        fs::write(store.path(), "{\"tokens\":").map_err(|error| StorageError::Io(error.to_string()))?;

        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn record_file_is_private_to_owner() -> Result<(), StorageError> {
        use std::os::unix::fs::PermissionsExt;

        let dir = ScratchDir::new();
        let store = FileSessionStore::new(&dir.0, "authState");
        store.save(&record())?;
        store.save(&record())?;

        let mode = fs::metadata(store.path())
            .map_err(|error| StorageError::Io(error.to_string()))?
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }

    #[test]
    fn clear_is_idempotent() -> Result<(), StorageError> {
        let dir = ScratchDir::new();
        let store = FileSessionStore::new(&dir.0, "authState");
        store.save(&record())?;

        store.clear()?;
        store.clear()?;

        assert_eq!(store.load()?, None);
        Ok(())
    }
}
