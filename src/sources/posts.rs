// src/sources/posts.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::sources::Source;
use crate::transform::{CanonicalRecord, RecordData};

pub(crate) const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts?_limit=5";

#[derive(Debug, Deserialize)]
struct Post {
    id: u64,
    title: String,
}

/// Posts arrive as a bare JSON array, no wrapper object.
pub(crate) fn items(payload: &Value) -> Result<&[Value]> {
    payload
        .as_array()
        .map(Vec::as_slice)
        .context("posts payload is not an array")
}

pub(crate) fn project(item: &Value) -> Result<CanonicalRecord> {
    let post = Post::deserialize(item).context("decoding post")?;
    Ok(CanonicalRecord {
        name: post.title,
        data: RecordData::Id(post.id),
        source: Source::Posts,
    })
}
