#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wpars_cli::run().await
}
