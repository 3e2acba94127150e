use clap::Parser;
use color_eyre::eyre::Result;

use crate::{
  app::App,
  cli::Cli,
  config::Config,
  utils::{initialize_logging, initialize_panic_handler},
};

pub mod action;
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod mode;
pub mod navigation;
pub mod tui;
pub mod utils;

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  let args = Cli::parse();
  let config = Config::new()?.with_overrides(&args);

  match App::new(&config, &args) {
    Ok(mut app) => app.run().await?,
    Err(e) => {
      eprintln!("Error: {} is not a usable update server URL: {}", config.api_url, e);
      std::process::exit(1);
    },
  }

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}
