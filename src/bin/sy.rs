use anyhow::Result;
use clap::Parser;

use sy::cli::SyArgs;

fn main() -> Result<()> {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();
    sy::init_tracing();

    sy::commands::sync::cmd_sync(SyArgs::parse())
}
