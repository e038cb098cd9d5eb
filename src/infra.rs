//! Infrastructure traits for abstracting I/O operations.
//!
//! Input validation and config loading go through [`FileSystem`] so they can
//! be exercised against an in-memory tree in tests. Entry synthesis writes
//! through `tokio::fs` directly since it is the only suspending step.

use std::io;
use std::path::Path;

/// Trait for abstracting the blocking filesystem operations used by the crate.
pub trait FileSystem {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}
