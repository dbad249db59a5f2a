//! In-memory backend
//!
//! Keeps files and directories in a shared map. Clones share state, so a test
//! can hand one clone to a `LogFile` and inspect another.

use super::FileSystem;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

impl MemoryState {
    fn has_dir(&self, path: &Path) -> bool {
        path.parent().is_none() || self.dirs.contains(path)
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

/// [`FileSystem`] kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its ancestors
    pub fn insert_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        let path = path.into();
        let mut state = self.state.lock();
        if let Some(parent) = path.parent() {
            for dir in parent.ancestors().filter(|dir| dir.parent().is_some()) {
                state.dirs.insert(dir.to_path_buf());
            }
        }
        state.files.insert(path, content.into());
    }

    /// Current bytes of a file, if present
    pub fn file_content(&self, path: &Path) -> Option<Vec<u8>> {
        self.state.lock().files.get(path).cloned()
    }
}

/// Write handle into a [`MemoryFileSystem`] file
#[derive(Debug)]
pub struct MemoryWriter {
    state: Arc<Mutex<MemoryState>>,
    path: PathBuf,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        let file = state
            .files
            .get_mut(&self.path)
            .ok_or_else(|| not_found(&self.path))?;
        file.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FileSystem for MemoryFileSystem {
    type Writer = MemoryWriter;
    type Reader = Cursor<Vec<u8>>;

    fn dir_exists(&self, path: &Path) -> bool {
        self.state.lock().has_dir(path)
    }

    fn create_dir(&self, path: &Path, recursive: bool) -> io::Result<()> {
        let mut state = self.state.lock();
        if recursive {
            for dir in path.ancestors().filter(|dir| dir.parent().is_some()) {
                state.dirs.insert(dir.to_path_buf());
            }
            return Ok(());
        }
        match path.parent() {
            Some(parent) if !state.has_dir(parent) => Err(not_found(parent)),
            _ => {
                state.dirs.insert(path.to_path_buf());
                Ok(())
            }
        }
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.state.lock().files.contains_key(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock();
        if let Some(parent) = path.parent() {
            if !state.has_dir(parent) {
                return Err(not_found(parent));
            }
        }
        if state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("file exists: {}", path.display()),
            ));
        }
        state.files.insert(path.to_path_buf(), Vec::new());
        Ok(())
    }

    fn open_write(&self, path: &Path, truncate: bool) -> io::Result<Self::Writer> {
        let mut state = self.state.lock();
        let file = state.files.get_mut(path).ok_or_else(|| not_found(path))?;
        if truncate {
            file.clear();
        }
        Ok(MemoryWriter {
            state: Arc::clone(&self.state),
            path: path.to_path_buf(),
        })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.state
            .lock()
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.file_content(path).ok_or_else(|| not_found(path))
    }

    fn open_read(&self, path: &Path) -> io::Result<Self::Reader> {
        self.read_all(path).map(Cursor::new)
    }
}
