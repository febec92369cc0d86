use serde::Deserialize;
use stylepost_core::config_loader::ConfigLoader;
use stylepost_core::diagnostic::Diagnostic;
use stylepost_core::diagnostic::ErrorKind;

/// Contents of `.stylepostrc`: the ordered list of post-processors to run.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StylepostRc {
  pub plugins: Vec<String>,
}

impl Default for StylepostRc {
  fn default() -> Self {
    StylepostRc {
      plugins: vec![String::from("stylepost-is-pseudo")],
    }
  }
}

impl StylepostRc {
  /// Load `.stylepostrc` from the project, falling back to the default
  /// plugin list when the project has none.
  pub fn load(config: &ConfigLoader) -> Result<Self, anyhow::Error> {
    config
      .load_json_config::<StylepostRc>(".stylepostrc")
      .map_or_else(
        |err| {
          let diagnostic = err.downcast_ref::<Diagnostic>();

          if diagnostic.is_some_and(|d| d.kind != ErrorKind::NotFound) {
            return Err(err);
          }

          Ok(StylepostRc::default())
        },
        |config_file| Ok(config_file.contents),
      )
  }
}
