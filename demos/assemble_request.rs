//! Basic example demonstrating fluent request assembly and dispatch.
//!
//! This example shows how to:
//! - Create a client with basic configuration
//! - Assemble a GET request with query parameters
//! - Assemble a POST request with a JSON body
//! - Access the raw response
//!
//! Run with: `cargo run --example assemble_request`

use parcel::{Client, Error, RequestSpec};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("parcel=debug,assemble_request=info")
        .init();

    // Create a client for the JSONPlaceholder API
    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .default_header("user-agent", "parcel-demo/0.1")?
        .build()?;

    println!("=== GET Request Example ===");
    let request = RequestSpec::get("/posts").query_param("userId", "1");
    let response = client.send(request).await?;

    println!("Status: {}", response.status);
    println!("Content-Type: {:?}", response.header("content-type"));
    println!("Body length: {} bytes", response.body.len());
    println!("Request latency: {:?}", response.latency);
    println!();

    println!("=== POST Request Example ===");
    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };

    let request = RequestSpec::post("/posts").json(&new_post)?;
    println!("Sending with content-type {:?}", request.content_type());

    let response = client.send(request).await?;
    println!("Status: {}", response.status);
    println!("Body: {}", response.body);

    Ok(())
}
