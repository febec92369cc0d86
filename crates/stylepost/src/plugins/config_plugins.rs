use std::sync::Arc;

use stylepost_core::diagnostic::ErrorKind;
use stylepost_core::diagnostic_error;
use stylepost_core::plugin::PluginContext;
use stylepost_core::plugin::PostProcessorPlugin;
use stylepost_plugin_is_pseudo::StylepostIsPseudoPlugin;

use super::Plugins;
use crate::config::StylepostRc;

/// Loads plugins based on the project's `.stylepostrc`
pub struct ConfigPlugins {
  /// The config that determines what plugins will be loaded
  config: StylepostRc,

  /// Dependencies available to all plugins
  ctx: PluginContext,
}

impl ConfigPlugins {
  pub fn new(config: StylepostRc, ctx: PluginContext) -> Self {
    ConfigPlugins { config, ctx }
  }
}

impl Plugins for ConfigPlugins {
  /// Resolve every configured plugin name to a constructed plugin, in
  /// config order.
  fn post_processors(&self) -> Result<Vec<Arc<dyn PostProcessorPlugin>>, anyhow::Error> {
    let mut post_processors: Vec<Arc<dyn PostProcessorPlugin>> = Vec::new();

    for plugin_name in self.config.plugins.iter() {
      match plugin_name.as_str() {
        "stylepost-is-pseudo" => {
          post_processors.push(Arc::new(StylepostIsPseudoPlugin::new(&self.ctx)?));
        }
        _ => {
          return Err(diagnostic_error!(
            ErrorKind::NotFound,
            "No post-processor found for name {plugin_name}"
          ));
        }
      }
    }

    Ok(post_processors)
  }
}
