use std::path::PathBuf;

use clap::Parser;
use stylepost::Stylepost;
use tracing::error;

#[derive(Parser)]
#[command(name = "stylepost", about = "Build-time CSS post-processor")]
struct Args {
  /// Stylesheet to process
  input: PathBuf,

  /// Write the result here instead of stdout
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Directory where config discovery stops [default: the current directory]
  #[arg(long)]
  project_root: Option<PathBuf>,
}

fn main() {
  initialize_tracing();

  let args = Args::parse();
  run(args).unwrap_or_else(|e| {
    error!("Failed to run stylepost: {}", e);
    std::process::exit(1);
  });
}

fn run(args: Args) -> anyhow::Result<()> {
  let stylepost = Stylepost::new(None, args.project_root)?;
  let css = stylepost.process_file(&args.input)?;

  match args.output {
    Some(output) => stylepost.fs.write(&output, css.as_bytes())?,
    None => println!("{css}"),
  }

  Ok(())
}

fn initialize_tracing() {
  if std::env::var("RUST_LOG").is_err() {
    std::env::set_var("RUST_LOG", "info");
  }

  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();
}
