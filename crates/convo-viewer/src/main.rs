use clap::Parser;

use convo_viewer::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    cli::run(Cli::parse()).await
}
