/*
[INPUT]:  Feed URL and product identifier
[OUTPUT]: A handful of live ticker frames
[POS]:    Examples - WebSocket stream handling
[UPDATE]: When WebSocket API changes
*/

use coinbase_pro_adapter::http::SANDBOX_STREAM_URL;
use coinbase_pro_adapter::*;

/// Example: subscribe to the ticker channel and print the first frames
#[tokio::main]
async fn main() {
    println!("=== Coinbase Pro Ticker Stream Example ===\n");

    let mut stream = Stream::new(SANDBOX_STREAM_URL);
    if let Err(e) = stream.connect().await {
        eprintln!("Failed to connect: {}", e);
        return;
    }
    println!("✓ Connected to {}", stream.url());

    if let Err(e) = stream.send(&SubscribeMessage::ticker("BTC-USD")).await {
        eprintln!("Failed to subscribe: {}", e);
        return;
    }

    for _ in 0..5 {
        match stream.receive().await {
            Ok(frame) if frame.as_object().is_some_and(|fields| fields.is_empty()) => {
                println!("✗ Feed closed");
                break;
            }
            Ok(frame) => match StreamMessage::from_value(frame) {
                Ok(StreamMessage::Ticker(tick)) => {
                    println!("✓ {} {:?} (bid {:?} ask {:?})", tick.product_id, tick.price, tick.best_bid, tick.best_ask)
                }
                Ok(other) => println!("  {:?}", other),
                Err(e) => println!("✗ Unparsed frame: {}", e),
            },
            Err(e) => {
                println!("✗ Error: {}", e);
                break;
            }
        }
    }

    match stream.disconnect().await {
        Ok(_) => println!("\n✓ Ticker stream example complete"),
        Err(e) => eprintln!("Failed to disconnect: {}", e),
    }
}
