use std::sync::Arc;

use stylepost_core::plugin::PostProcessorPlugin;

pub mod config_plugins;

pub trait Plugins {
  fn post_processors(&self) -> Result<Vec<Arc<dyn PostProcessorPlugin>>, anyhow::Error>;
}
