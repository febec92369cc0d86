use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use stylepost_core::config_loader::ConfigLoader;
use stylepost_core::plugin::PluginContext;
use stylepost_core::plugin::PluginLogger;
use stylepost_core::plugin::PluginOptions;
use stylepost_core::plugin::PostProcessorPlugin;
use stylepost_css_ast::Stylesheet;
use stylepost_filesystem::os_file_system::OsFileSystem;
use stylepost_filesystem::FileSystemRef;

use crate::config::StylepostRc;
use crate::plugins::config_plugins::ConfigPlugins;
use crate::plugins::Plugins;

/// The pipeline: resolves the project's plugin registry once, then processes
/// any number of stylesheets through it.
pub struct Stylepost {
  pub fs: FileSystemRef,
  pub project_root: PathBuf,
  post_processors: Vec<Arc<dyn PostProcessorPlugin>>,
}

impl Stylepost {
  pub fn new(
    fs: Option<FileSystemRef>,
    project_root: Option<PathBuf>,
  ) -> Result<Self, anyhow::Error> {
    let fs = fs.unwrap_or_else(|| Arc::new(OsFileSystem));
    let project_root = match project_root {
      Some(project_root) => project_root,
      None => fs.cwd()?,
    };

    let config = Arc::new(ConfigLoader {
      fs: fs.clone(),
      project_root: project_root.clone(),
      search_path: project_root.clone(),
    });

    let stylepost_rc = StylepostRc::load(&config)?;

    let ctx = PluginContext {
      config,
      file_system: fs.clone(),
      logger: PluginLogger::default(),
      options: Arc::new(PluginOptions {
        project_root: project_root.clone(),
        ..Default::default()
      }),
    };

    let post_processors = ConfigPlugins::new(stylepost_rc, ctx).post_processors()?;

    Ok(Stylepost {
      fs,
      project_root,
      post_processors,
    })
  }

  /// Parse, run every registered post-processor once in registry order, and
  /// render the result.
  #[tracing::instrument(level = "debug", skip_all)]
  pub fn process_stylesheet(&self, css: &str) -> Result<String, anyhow::Error> {
    let mut stylesheet = Stylesheet::parse(css);

    for post_processor in self.post_processors.iter() {
      tracing::debug!(plugin = post_processor.name(), "Running post-processor");
      post_processor.process(&mut stylesheet)?;
    }

    Ok(stylesheet.to_css_string())
  }

  pub fn process_file(&self, input: &Path) -> Result<String, anyhow::Error> {
    let css = self.fs.read_to_string(input)?;
    self.process_stylesheet(&css)
  }
}
