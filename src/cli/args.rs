//! Command line argument parsing

use clap::Parser;
use std::time::Duration;

/// fbget - resolve a media page link and download the variant you pick
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Media page URL to resolve and download
    pub url: Option<String>,

    /// Variant to download (hd, sd, low, audio)
    #[arg(short, long, value_name = "VARIANT", default_value = "hd")]
    pub quality: String,

    /// Resolve only; print the descriptor and exit without downloading
    #[arg(short, long)]
    pub list: bool,

    /// Run the HTTP API server instead of a one-shot download
    #[arg(long)]
    pub serve: bool,

    /// Port for the HTTP API server
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Seed for the resolver's random source (reproducible output)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Simulated analysis delay (e.g. 2s)
    #[arg(long, value_name = "DURATION", default_value = "0s")]
    pub delay: humantime::Duration,

    /// How long notifications stay on screen
    #[arg(long, value_name = "DURATION", default_value = "4s")]
    pub notify_ttl: humantime::Duration,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Analysis delay as a std duration
    pub fn delay_duration(&self) -> Duration {
        self.delay.into()
    }

    /// Notification TTL as a std duration
    pub fn notify_ttl_duration(&self) -> Duration {
        self.notify_ttl.into()
    }
}
