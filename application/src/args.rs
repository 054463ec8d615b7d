//! [`Args`] definitions.

use clap::Parser;

/// Terminal client of the Golden Spoon restaurant.
#[derive(Debug, Parser)]
#[command(name = "golden-spoon", version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Base URL of the restaurant API, overriding the configured one.
    #[arg(long, value_name = "URL")]
    pub api: Option<String>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
