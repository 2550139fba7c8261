use anyhow::Result;
use mailtriage::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
