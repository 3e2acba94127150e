use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug, Default)]
#[command(author, version = version(), about)]
pub struct Cli {
  /// Base URL of the update server, e.g. https://updates.example.com
  #[arg(long, value_name = "URL")]
  pub api_url: Option<String>,

  /// Bearer token sent with every request
  #[arg(long, value_name = "TOKEN")]
  pub api_token: Option<String>,

  /// Location to open, as a query (`branch=main&runtimeVersion=1.0.0`) or a full URL
  #[arg(short, long, value_name = "QUERY|URL")]
  pub location: Option<String>,

  /// Tick rate, i.e. number of ticks per second
  #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
  pub tick_rate: f64,

  /// Frame rate, i.e. number of frames per second
  #[arg(short, long, value_name = "FLOAT", default_value_t = 30.0)]
  pub frame_rate: f64,
}
