use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use stylepost_filesystem::search::find_ancestor_file;
use stylepost_filesystem::FileSystemRef;

use crate::diagnostic::ErrorKind;
use crate::diagnostic_error;

pub type ConfigLoaderRef = Arc<ConfigLoader>;

/// Locates and deserializes JSON config files for the pipeline and its
/// plugins. Files are searched upwards from `search_path` until
/// `project_root` has been visited.
#[derive(Debug)]
pub struct ConfigLoader {
  pub fs: FileSystemRef,
  pub project_root: PathBuf,
  pub search_path: PathBuf,
}

#[derive(Debug, PartialEq)]
pub struct ConfigFile<T> {
  pub contents: T,
  pub path: PathBuf,
  pub raw: String,
}

impl ConfigLoader {
  pub fn load_json_config<Config: DeserializeOwned>(
    &self,
    filename: &str,
  ) -> Result<ConfigFile<Config>, anyhow::Error> {
    let path = find_ancestor_file(
      &*self.fs,
      &[filename],
      &self.search_path,
      &self.project_root,
    )
    .ok_or_else(|| {
      diagnostic_error!(
        ErrorKind::NotFound,
        "Unable to locate {filename} config file from {}",
        self.search_path.display()
      )
    })?;

    let code = self.fs.read_to_string(&path)?;

    let contents = serde_json::from_str::<Config>(&code).map_err(|error| {
      diagnostic_error!(
        ErrorKind::ParseError,
        "Error parsing {}: {error}",
        path.display()
      )
    })?;

    Ok(ConfigFile {
      contents,
      path,
      raw: code,
    })
  }

  pub fn load_package_json<Config: DeserializeOwned>(
    &self,
  ) -> Result<ConfigFile<Config>, anyhow::Error> {
    self.load_json_config::<Config>("package.json")
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use stylepost_filesystem::in_memory_file_system::InMemoryFileSystem;

  use super::*;
  use crate::diagnostic::Diagnostic;

  mod load_json_config {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct JsonConfig {}

    #[test]
    fn returns_an_error_when_the_config_does_not_exist() {
      let project_root = PathBuf::from("/project-root");
      let search_path = project_root.join("index");

      let config = ConfigLoader {
        fs: Arc::new(InMemoryFileSystem::default()),
        project_root,
        search_path: search_path.clone(),
      };

      let error = config
        .load_json_config::<JsonConfig>("config.json")
        .unwrap_err();

      assert_eq!(
        error.downcast_ref::<Diagnostic>().map(|d| d.kind),
        Some(ErrorKind::NotFound)
      );
      assert_eq!(
        error.to_string(),
        format!(
          "Unable to locate config.json config file from {}",
          search_path.display()
        )
      );
    }

    #[test]
    fn returns_an_error_when_the_config_is_outside_the_project_root() {
      let fs = Arc::new(InMemoryFileSystem::default());
      let project_root = PathBuf::from("/project-root");
      let search_path = project_root.join("index");

      fs.write_file(Path::new("/config.json"), String::from("{}"));

      let config = ConfigLoader {
        fs,
        project_root,
        search_path,
      };

      assert!(config.load_json_config::<JsonConfig>("config.json").is_err());
    }

    #[test]
    fn returns_a_parse_error_for_malformed_json() {
      let fs = Arc::new(InMemoryFileSystem::default());
      let project_root = PathBuf::from("/project-root");
      let search_path = project_root.join("index");

      fs.write_file(&search_path.join("config.json"), String::from("{invalid"));

      let config = ConfigLoader {
        fs,
        project_root,
        search_path,
      };

      let error = config
        .load_json_config::<JsonConfig>("config.json")
        .unwrap_err();

      assert_eq!(
        error.downcast_ref::<Diagnostic>().map(|d| d.kind),
        Some(ErrorKind::ParseError)
      );
    }

    #[test]
    fn returns_json_config_at_search_path() {
      let fs = Arc::new(InMemoryFileSystem::default());
      let project_root = PathBuf::from("/project-root");
      let search_path = project_root.join("index");
      let config_path = search_path.join("config.json");

      fs.write_file(&config_path, String::from("{}"));

      let config = ConfigLoader {
        fs,
        project_root,
        search_path,
      };

      assert_eq!(
        config
          .load_json_config::<JsonConfig>("config.json")
          .map_err(|err| err.to_string()),
        Ok(ConfigFile {
          path: config_path,
          contents: JsonConfig {},
          raw: String::from("{}")
        })
      );
    }

    #[test]
    fn returns_json_config_at_project_root() {
      let fs = Arc::new(InMemoryFileSystem::default());
      let project_root = PathBuf::from("/project-root");
      let search_path = project_root.join("index");
      let config_path = project_root.join("config.json");

      fs.write_file(&config_path, String::from("{}"));

      let config = ConfigLoader {
        fs,
        project_root,
        search_path,
      };

      assert_eq!(
        config
          .load_json_config::<JsonConfig>("config.json")
          .map_err(|err| err.to_string()),
        Ok(ConfigFile {
          path: config_path,
          contents: JsonConfig {},
          raw: String::from("{}")
        })
      );
    }
  }

  mod load_package_json {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct PackageJsonConfig {
      name: String,
    }

    #[test]
    fn returns_package_config_at_search_path() {
      let fs = Arc::new(InMemoryFileSystem::default());
      let project_root = PathBuf::from("/project-root");
      let search_path = project_root.join("index");

      fs.write_file(
        &search_path.join("package.json"),
        String::from(r#"{ "name": "styles" }"#),
      );

      let config = ConfigLoader {
        fs,
        project_root,
        search_path,
      };

      let config_file = config.load_package_json::<PackageJsonConfig>().unwrap();

      assert_eq!(
        config_file.contents,
        PackageJsonConfig {
          name: String::from("styles")
        }
      );
    }

    #[test]
    fn returns_not_found_when_package_json_does_not_exist() {
      let config = ConfigLoader {
        fs: Arc::new(InMemoryFileSystem::default()),
        project_root: PathBuf::from("/project-root"),
        search_path: PathBuf::from("/project-root/index"),
      };

      let error = config
        .load_package_json::<PackageJsonConfig>()
        .unwrap_err();

      assert_eq!(
        error.downcast_ref::<Diagnostic>().map(|d| d.kind),
        Some(ErrorKind::NotFound)
      );
    }
  }
}
