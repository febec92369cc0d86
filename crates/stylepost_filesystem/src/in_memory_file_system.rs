use std::collections::HashMap;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use parking_lot::RwLock;

use crate::FileSystem;

/// In memory implementation of a file-system entry
#[derive(Debug)]
enum InMemoryFileSystemEntry {
  File { contents: String },
  Directory,
}

/// In memory implementation of the `FileSystem` trait, for testing purposes.
#[derive(Debug)]
pub struct InMemoryFileSystem {
  files: RwLock<HashMap<PathBuf, InMemoryFileSystemEntry>>,
  current_working_directory: RwLock<PathBuf>,
}

impl Default for InMemoryFileSystem {
  fn default() -> Self {
    Self {
      files: Default::default(),
      current_working_directory: RwLock::new(PathBuf::from("/")),
    }
  }
}

impl InMemoryFileSystem {
  /// Change the current working directory. Used for resolving relative paths.
  pub fn set_current_working_directory(&self, cwd: &Path) {
    let cwd = self.resolve(cwd);
    let mut state = self.current_working_directory.write();
    *state = cwd;
  }

  /// Write a file, creating the chain of parent directories along with it.
  pub fn write_file(&self, path: &Path, contents: String) {
    let path = self.resolve(path);
    let mut files = self.files.write();

    let mut dir = path.parent();
    while let Some(parent) = dir {
      files.insert(parent.to_path_buf(), InMemoryFileSystemEntry::Directory);
      dir = parent.parent();
    }

    files.insert(path, InMemoryFileSystemEntry::File { contents });
  }

  /// Resolve a path against the current working directory and normalize away
  /// `.` and `..` components.
  fn resolve(&self, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.current_working_directory.read().join(path)
    };

    let mut result = PathBuf::new();
    for component in absolute.components() {
      match component {
        Component::CurDir => {}
        Component::ParentDir => {
          result.pop();
        }
        component => result.push(component),
      }
    }

    result
  }
}

impl FileSystem for InMemoryFileSystem {
  fn cwd(&self) -> io::Result<PathBuf> {
    Ok(self.current_working_directory.read().clone())
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let path = self.resolve(path);
    let files = self.files.read();
    match files.get(&path) {
      None => Err(io::Error::new(io::ErrorKind::NotFound, "File not found")),
      Some(InMemoryFileSystemEntry::File { contents }) => Ok(contents.clone()),
      Some(InMemoryFileSystemEntry::Directory) => Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "Path is a directory",
      )),
    }
  }

  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
    let contents = String::from_utf8(contents.to_vec())
      .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Contents are not UTF-8"))?;
    self.write_file(path, contents);
    Ok(())
  }

  fn is_file(&self, path: &Path) -> bool {
    let path = self.resolve(path);
    let files = self.files.read();
    matches!(files.get(&path), Some(InMemoryFileSystemEntry::File { .. }))
  }

  fn is_dir(&self, path: &Path) -> bool {
    let path = self.resolve(path);
    let files = self.files.read();
    matches!(files.get(&path), Some(InMemoryFileSystemEntry::Directory))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writes_and_reads_files() {
    let fs = InMemoryFileSystem::default();
    let path = PathBuf::from("/project/styles.css");

    fs.write_file(&path, String::from("a { color: red }"));

    assert_eq!(fs.read_to_string(&path).unwrap(), "a { color: red }");
    assert!(fs.is_file(&path));
    assert!(fs.is_dir(Path::new("/project")));
  }

  #[test]
  fn returns_not_found_for_missing_files() {
    let fs = InMemoryFileSystem::default();

    let error = fs.read_to_string(Path::new("/missing.css")).unwrap_err();

    assert_eq!(error.kind(), io::ErrorKind::NotFound);
  }

  #[test]
  fn resolves_relative_paths_against_cwd() {
    let fs = InMemoryFileSystem::default();
    fs.write_file(Path::new("/project/styles.css"), String::from("a {}"));
    fs.set_current_working_directory(Path::new("/project"));

    assert_eq!(fs.read_to_string(Path::new("styles.css")).unwrap(), "a {}");
  }

  #[test]
  fn normalizes_dot_components() {
    let fs = InMemoryFileSystem::default();
    fs.write_file(Path::new("/project/styles.css"), String::from("a {}"));

    assert!(fs.is_file(Path::new("/project/nested/../styles.css")));
    assert!(fs.is_file(Path::new("/project/./styles.css")));
  }
}
