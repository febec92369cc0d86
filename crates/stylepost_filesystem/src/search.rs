use std::path::Path;
use std::path::PathBuf;

use crate::FileSystem;

/// Search upwards from `from` for a file with one of the given names,
/// stopping after `root` has been searched.
pub fn find_ancestor_file(
  fs: &dyn FileSystem,
  filenames: &[&str],
  from: &Path,
  root: &Path,
) -> Option<PathBuf> {
  for dir in from.ancestors() {
    for filename in filenames {
      let candidate = dir.join(filename);
      if fs.is_file(&candidate) {
        return Some(candidate);
      }
    }

    if dir == root {
      break;
    }
  }

  None
}
