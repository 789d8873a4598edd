use clap::Parser;
use coha_drift::cli::{run, Cli};
use coha_drift::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
