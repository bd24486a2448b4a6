mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use legible_ocr::{JsonEngine, OcrEngine, OcrInput};
use legible_rs::recognized_text;
use tracing::info;

#[tokio::main]
async fn main() {
  let args = Args::parse();

  tracing_subscriber::fmt()
    .with_max_level(args.log_level)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  if let Err(e) = run(args).await {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}

async fn run(args: Args) -> anyhow::Result<()> {
  let Some((file, mode)) = args.target() else {
    println!("legible {}", env!("CARGO_PKG_VERSION"));
    return Ok(());
  };

  let config = args
    .assembly_config()
    .context("Failed to load configuration")?;

  let engine = JsonEngine::new();
  let output = engine
    .recognize(&OcrInput::FilePath(file.to_path_buf()))
    .await
    .with_context(|| format!("Failed to read fragments from {}", file.display()))?;
  info!(fragments = output.fragments.len(), ?mode, "loaded fragments");

  println!("{}", recognized_text(&output.fragments, mode, &config));
  Ok(())
}
