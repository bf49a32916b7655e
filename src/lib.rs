//! # jsonapi-normalize - JSON:API Store Normalization
//!
//! Converts JSON:API documents into a flat store keyed by resource type and
//! id, ready to drop into an application state container.
//!
//! ## Modules
//!
//! - **normalize**: key casing, relationship and entity extraction, endpoint metadata
//! - **error**: errors raised for documents that are not JSON:API shaped
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonapi_normalize::{normalize, NormalizeOptions};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = json!({
//!     "data": {"id": "1", "type": "articles", "attributes": {"first_name": "X"}},
//!     "included": [{"id": "9", "type": "people", "attributes": {"last_name": "Y"}}]
//! });
//!
//! let options = NormalizeOptions::default().with_endpoint("/articles/1");
//! let store = normalize(&document, &options)?;
//!
//! assert_eq!(store["articles"]["1"]["attributes"]["firstName"], "X");
//! assert_eq!(store["people"]["9"]["attributes"]["lastName"], "Y");
//! assert_eq!(store["meta"]["/articles/1"]["data"][0]["id"], "1");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufRead, Write};

pub mod error;
pub mod normalize;

// Re-export commonly used types for convenience
pub use error::NormalizeError;
pub use normalize::{
    camel_case, camelize_keys, normalize, normalize_document, Document, NormalizeOptions,
    Normalizer, ResourceIdentifier,
};

/// Normalize a stream of newline-delimited JSON:API documents
///
/// Each non-empty input line is one document; each output line is the
/// normalized store for it. Returns the number of documents written.
pub fn normalize_json<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    options: NormalizeOptions,
) -> Result<usize> {
    let normalizer = Normalizer::new(options);
    let mut count = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse JSON on line {}", line_no + 1))?;
        let normalized = normalizer
            .normalize(&value)
            .with_context(|| format!("Failed to normalize document on line {}", line_no + 1))?;

        let json = serde_json::to_string(&normalized).context("Failed to serialize document")?;
        writeln!(writer, "{}", json).context("Failed to write document")?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_json_stream() {
        let input = concat!(
            r#"{"data": {"id": "1", "type": "articles"}}"#,
            "\n\n",
            r#"{"data": [{"id": "2", "type": "blog-posts"}]}"#,
            "\n"
        );

        let mut output = Vec::new();
        let count =
            normalize_json(input.as_bytes(), &mut output, NormalizeOptions::default()).unwrap();
        assert_eq!(count, 2);

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines[0]["articles"]["1"]["type"], json!("articles"));
        assert_eq!(lines[1]["blogPosts"]["2"]["type"], json!("blogPosts"));
    }

    #[test]
    fn test_normalize_json_reports_bad_line() {
        let input = "{\"data\": {\"id\": \"1\", \"type\": \"a\"}}\nnot json\n";
        let mut output = Vec::new();

        let err = normalize_json(input.as_bytes(), &mut output, NormalizeOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
