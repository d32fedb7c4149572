use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    bocha_search::cli::run().await
}
