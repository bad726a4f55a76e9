//! Example demonstrating multipart bodies and file attachments.
//!
//! This example shows how to:
//! - Build a multipart body from typed parts
//! - Validate dynamic part specifications as a batch
//! - Attach a file that rides along with a url-encoded form
//!
//! Run with: `cargo run --example multipart_upload`

use parcel::{Client, ContentKind, Error, Part, RequestSpec};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("parcel=debug,multipart_upload=info")
        .init();

    let client = Client::builder()
        .base_url("https://httpbin.org")?
        .build()?;

    println!("=== Typed Multipart Parts ===");
    let request = RequestSpec::post("/post").multipart(vec![
        Part::field("field1", "val1"),
        Part::field("field2", "val2"),
    ]);
    let response = client.send(request).await?;
    println!("Status: {}", response.status);
    println!();

    println!("=== Dynamic Part Specifications ===");
    // Dynamic specs are validated as a batch; every malformed entry is
    // reported, not just the first.
    let result = RequestSpec::post("/post").body(
        vec![json!(["field1", "val1"]), json!({"bad": "shape"}), json!(42)],
        ContentKind::Multipart,
    );
    match result {
        Err(e) => {
            println!("Rejected: {}", e);
            for part in e.malformed_parts().unwrap_or_default() {
                println!("  offending spec: {}", part.spec);
                println!("  guidance: {}", part.guidance);
            }
        }
        Ok(_) => unreachable!("the batch contains malformed parts"),
    }
    println!();

    println!("=== File Attachment With a Form Body ===");
    let file_path = std::env::temp_dir().join("parcel-demo.txt");
    std::fs::write(&file_path, "file contents here")?;

    let request = RequestSpec::post("/post")
        .attach(Part::file(file_path.to_str().expect("utf-8 temp path")))
        .body(json!({"name": "value"}), ContentKind::UrlEncoded)?;

    let response = client.send(request).await?;
    std::fs::remove_file(&file_path)?;

    println!("Status: {}", response.status);
    println!("Body: {}", response.body);

    Ok(())
}
