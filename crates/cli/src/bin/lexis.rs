use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    lexis_cli::main_entry().await
}
