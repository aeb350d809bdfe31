// src/main.rs

#[tokio::main]
async fn main() {
    columncast::run().await;
}
