/// Quickstart example - normalize one article with its included author
use jsonapi_normalize::{normalize, NormalizeOptions};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    println!("=== JSON:API Normalize Quick Start ===\n");

    // Step 1: A JSON:API response
    let document = json!({
        "data": {
            "id": "1",
            "type": "articles",
            "attributes": {"first_name": "X"},
            "relationships": {
                "author": {"data": {"id": "9", "type": "people"}}
            }
        },
        "included": [
            {"id": "9", "type": "people", "attributes": {"last_name": "Y"}}
        ]
    });

    println!("Original document:");
    println!("{}\n", serde_json::to_string_pretty(&document)?);

    // Step 2: Say where it came from so the store records the listing
    let options = NormalizeOptions::default().with_endpoint("/articles/1");

    // Step 3: Flatten it
    let store = normalize(&document, &options)?;

    println!("Normalized store:");
    println!("{}\n", serde_json::to_string_pretty(&store)?);

    // Step 4: Look entities up by type and id
    let author_id = &store["articles"]["1"]["relationships"]["author"]["data"]["id"];
    if let Some(author_id) = author_id.as_str() {
        println!(
            "Article 1 was written by {}",
            store["people"][author_id]["attributes"]["lastName"]
        );
    }

    Ok(())
}
