//! The application state shared between route handlers.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use crate::{Error, snapshot::Snapshot};

/// The state shared between all route handlers.
///
/// The snapshot sits behind a read-write lock so any number of dashboard
/// renders can read it concurrently while a refresh swaps it out whole.
#[derive(Debug, Clone)]
pub struct AppState {
    snapshot: Arc<RwLock<Snapshot>>,
    snapshot_path: PathBuf,
    timezone: String,
}

impl AppState {
    /// Load the snapshot at `path` and build the shared state around it.
    ///
    /// `timezone` must be a canonical IANA name. It is validated by the
    /// server before the state is built, so handlers treat resolution
    /// failures as internal errors.
    pub fn from_file(path: &Path, timezone: &str) -> Result<Self, Error> {
        let snapshot = Snapshot::load(path)?;

        Ok(Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
            snapshot_path: path.to_owned(),
            timezone: timezone.to_owned(),
        })
    }

    /// Build state around an already-parsed snapshot. Used in tests.
    pub fn with_snapshot(snapshot: Snapshot, timezone: &str) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
            snapshot_path: PathBuf::new(),
            timezone: timezone.to_owned(),
        }
    }

    /// The business timezone every report is computed in.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Run `read` against the current snapshot under the read lock.
    pub fn read_snapshot<T>(&self, read: impl FnOnce(&Snapshot) -> T) -> Result<T, Error> {
        let snapshot = self.snapshot.read().map_err(|_| Error::SnapshotLock)?;
        Ok(read(&snapshot))
    }

    /// Re-read the snapshot file and swap it in atomically.
    ///
    /// A failed reload leaves the previous snapshot in place.
    pub fn reload(&self) -> Result<(), Error> {
        let fresh = Snapshot::load(&self.snapshot_path)?;
        let mut snapshot = self.snapshot.write().map_err(|_| Error::SnapshotLock)?;
        *snapshot = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::snapshot::Snapshot;

    #[test]
    fn reads_see_the_held_snapshot() {
        let snapshot = Snapshot::from_json(r#"{"orders": [{"id": "o1"}]}"#).unwrap();
        let state = AppState::with_snapshot(snapshot, "America/Chicago");

        let count = state.read_snapshot(|snapshot| snapshot.orders.len()).unwrap();
        assert_eq!(count, 1);
        assert_eq!(state.timezone(), "America/Chicago");
    }

    #[test]
    fn reloading_a_missing_file_keeps_the_old_snapshot() {
        let snapshot = Snapshot::from_json(r#"{"orders": [{"id": "o1"}]}"#).unwrap();
        let state = AppState::with_snapshot(snapshot, "America/Chicago");

        assert!(state.reload().is_err());
        let count = state.read_snapshot(|snapshot| snapshot.orders.len()).unwrap();
        assert_eq!(count, 1);
    }
}
