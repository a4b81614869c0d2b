use anyhow::Result;
use clap::Parser;

use sy::cli::SyRemoteArgs;

fn main() -> Result<()> {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();
    sy::init_tracing();

    sy::commands::remote::cmd_remote(SyRemoteArgs::parse().command)
}
