use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// In-memory file-system for testing
pub mod in_memory_file_system;

/// File-system implementation using std::fs
pub mod os_file_system;

pub mod search;

/// FileSystem abstraction instance
///
/// This should be `OsFileSystem` for non-testing environments and
/// `InMemoryFileSystem` for testing.
pub type FileSystemRef = Arc<dyn FileSystem + Send + Sync>;

/// Trait abstracting the file-system operations the pipeline performs
pub trait FileSystem: std::fmt::Debug {
  fn cwd(&self) -> io::Result<PathBuf> {
    Err(io::Error::new(
      io::ErrorKind::Other,
      "Not implemented: FileSystem::cwd",
    ))
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String>;
  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
  fn is_file(&self, path: &Path) -> bool;
  fn is_dir(&self, path: &Path) -> bool;
}
