#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kanji_drill::run().await
}
