use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use stylepost_css_ast::Stylesheet;
use stylepost_filesystem::FileSystemRef;

use crate::config_loader::ConfigLoaderRef;
use crate::types::LogLevel;

/// Dependencies available to every plugin constructor
pub struct PluginContext {
  pub config: ConfigLoaderRef,
  pub file_system: FileSystemRef,
  pub logger: PluginLogger,
  pub options: Arc<PluginOptions>,
}

#[derive(Default)]
pub struct PluginLogger {}

#[derive(Debug, Default)]
pub struct PluginOptions {
  pub log_level: LogLevel,
  pub project_root: PathBuf,
}

/// Rewrites a fully built rule tree in place.
///
/// A post-processor runs exactly once per stylesheet, after parsing and
/// before serialization. `name` is the stable identifier the registry and
/// config files use to refer to the plugin.
pub trait PostProcessorPlugin: Debug + Send + Sync {
  fn name(&self) -> &'static str;

  fn process(&self, stylesheet: &mut Stylesheet) -> Result<(), anyhow::Error>;
}
