//! Storage backends
//!
//! [`FileSystem`] is everything a [`LogFile`](crate::LogFile) needs from the
//! host: existence checks, directory and file creation, an append/truncate
//! write handle, removal, and reads. Any backend implementing it can stand in
//! for the local disk.

pub mod local;
pub mod memory;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

use std::io::{self, Read, Write};
use std::path::Path;

pub trait FileSystem: Send + Sync {
    /// Write handle returned by [`FileSystem::open_write`]
    type Writer: Write + Send;
    /// Read handle returned by [`FileSystem::open_read`]
    type Reader: Read + Send;

    fn dir_exists(&self, path: &Path) -> bool;

    /// Create a directory; with `recursive` missing ancestors are created too
    fn create_dir(&self, path: &Path, recursive: bool) -> io::Result<()>;

    fn file_exists(&self, path: &Path) -> bool;

    /// Create an empty file; fails if it already exists
    fn create_file(&self, path: &Path) -> io::Result<()>;

    /// Open a write handle on an existing file
    ///
    /// With `truncate` the file is emptied first, otherwise writes append
    /// after the existing content.
    fn open_write(&self, path: &Path, truncate: bool) -> io::Result<Self::Writer>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn open_read(&self, path: &Path) -> io::Result<Self::Reader>;
}
