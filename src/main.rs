use clap::Parser;
use windrose_bot::cli::{run, Cli};
use windrose_bot::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
