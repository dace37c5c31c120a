use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::warn;

use crate::trace::trace::JournalEntry;

/// Append-only JSONL journal of handled requests. Write failures are logged
/// and never reach the caller.
pub struct Journal {
    path: PathBuf,
    file: Option<Mutex<std::fs::File>>,
}

impl Journal {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path);

        match file {
            Ok(f) => Self {
                path,
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not open journal");
                Self { path, file: None }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn record(&self, entry: &JournalEntry) {
        let Some(file_mutex) = &self.file else {
            return;
        };

        let json = match serde_json::to_string(entry) {
            Ok(j) => j,
            Err(e) => {
                warn!(error = %e, "failed to serialize journal entry");
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "journal lock poisoned");
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            warn!(path = %self.path.display(), error = %e, "failed to write journal entry");
        }
    }
}
