//! `trackd` - Issue tracking GraphQL API.
//!
//! Single process: one GraphQL endpoint over HTTP, one MongoDB
//! collection behind it. No scheduler, no daemon, no cache.

use trackd::run;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
