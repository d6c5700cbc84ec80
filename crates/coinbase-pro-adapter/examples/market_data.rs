/*
[INPUT]:  Product identifier (e.g., "BTC-USD")
[OUTPUT]: Server time, ticker and order book snapshot
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use coinbase_pro_adapter::*;
use serde_json::json;

/// Example: Query market data (no authentication required)
///
/// Runs against the sandbox so it is safe to try without keys.
#[tokio::main]
async fn main() {
    println!("=== Coinbase Pro Market Data Example ===\n");

    let client = match CoinbaseClient::with_config(ClientConfig::default(), RestApi::sandbox()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no auth required for public endpoints)\n");

    let product = "BTC-USD";

    println!("Querying server time...");
    match client.time().get().await {
        Ok(time) => println!("✓ Server time: {} ({})", time.iso, time.epoch),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying ticker for {}...", product);
    match client.products().ticker(product).await {
        Ok(ticker) => println!("✓ Ticker: bid {} ask {} last {}", ticker.bid, ticker.ask, ticker.price),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying level 1 book for {}...", product);
    match client.products().book(product, Some(&json!({"level": 1}))).await {
        Ok(book) => println!("✓ Book: bids {} asks {}", book["bids"], book["asks"]),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
