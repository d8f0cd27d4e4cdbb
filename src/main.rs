//! rWorklog main entrypoint.

use rworklog::run;

#[tokio::main]
async fn main() {
    println!();
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
