//! Process configuration for trackd.
//!
//! Everything comes from the command line or the environment: a
//! MongoDB connection string, a database name, and a listen port.

use clap::Parser;

/// trackd - Issue tracking GraphQL API.
#[derive(Parser, Debug)]
#[command(name = "trackd")]
#[command(
    author,
    version,
    about = "Issue tracking GraphQL API (MongoDB)",
    long_about = None
)]
pub struct Config {
    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI")]
    pub mongo_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGO_DATABASE", default_value = "trackd")]
    pub database: String,

    /// HTTP listen port
    #[arg(long, env = "PORT", default_value_t = 3500)]
    pub port: u16,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,
}
