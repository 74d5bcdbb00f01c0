#[tokio::main]
async fn main() -> anyhow::Result<()> {
    raffle::start_server().await
}
