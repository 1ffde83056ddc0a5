mod cli;
mod config;
mod main_lib;

use clap::Parser;

use cli::Cli;
use main_lib::{init_tracing, run};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli))
}
