// src/sources/github.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::sources::Source;
use crate::transform::{CanonicalRecord, RecordData};

pub(crate) const DEFAULT_ENDPOINT: &str =
    "https://api.github.com/search/repositories?q=language:rust&sort=stars&per_page=5";

#[derive(Debug, Deserialize)]
struct Repo {
    name: String,
    stargazers_count: u64,
}

/// The search payload wraps the repositories in an `items` array.
pub(crate) fn items(payload: &Value) -> Result<&[Value]> {
    payload
        .get("items")
        .context("github payload missing `items`")?
        .as_array()
        .map(Vec::as_slice)
        .context("github `items` is not an array")
}

pub(crate) fn project(item: &Value) -> Result<CanonicalRecord> {
    let repo = Repo::deserialize(item).context("decoding github repository")?;
    Ok(CanonicalRecord {
        name: repo.name,
        data: RecordData::Text(format!("{} stars", repo.stargazers_count)),
        source: Source::Github,
    })
}
