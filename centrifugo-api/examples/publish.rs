//! Publish a message and read it back from history against a running server.
//!
//! Requires a Centrifugo server with history enabled for the channel
//! namespace. Not run in CI.
//!
//! ```sh
//! CENTRIFUGO_API_KEY=secret cargo run -p centrifugo-api --example publish -- news
//! ```

use centrifugo_api::{Client, Config, Error, HistoryRequest, PublishRequest};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let api_key = std::env::var("CENTRIFUGO_API_KEY").unwrap_or_default();
    let base_url = std::env::var("CENTRIFUGO_API_URL")
        .unwrap_or_else(|_| centrifugo_api::DEFAULT_BASE_URL.to_string());
    let channel = std::env::args().nth(1).unwrap_or_else(|| "news".to_string());

    let client = Client::new(Config::new(api_key).with_base_url(base_url))?;

    let req = PublishRequest::new(&channel, json!({"text": "hello from rust"}))?;
    let published = client.publication().publish(&req).await?.into_result()?;
    println!("published: offset={:?} epoch={:?}", published.offset, published.epoch);

    let history = HistoryRequest::new(&channel)?.limit(10).reverse(true);
    let result = client.history().history(&history).await?.into_result()?;
    for publication in &result.publications {
        println!("{:?}: {}", publication.offset, publication.data);
    }

    match client.presence().stats_of(&channel).await?.into_result() {
        Ok(stats) => println!(
            "presence: {} clients, {} users",
            stats.num_clients, stats.num_users
        ),
        Err(e) => println!("presence unavailable: {e}"),
    }

    Ok(())
}
