// src/sources/users.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::sources::Source;
use crate::transform::{CanonicalRecord, RecordData};

pub(crate) const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/?results=5";

#[derive(Debug, Deserialize)]
struct User {
    name: UserName,
    email: String,
}

#[derive(Debug, Deserialize)]
struct UserName {
    first: String,
    last: String,
}

/// The API wraps generated users in a `results` array.
pub(crate) fn items(payload: &Value) -> Result<&[Value]> {
    payload
        .get("results")
        .context("users payload missing `results`")?
        .as_array()
        .map(Vec::as_slice)
        .context("users `results` is not an array")
}

pub(crate) fn project(item: &Value) -> Result<CanonicalRecord> {
    let user = User::deserialize(item).context("decoding user")?;
    Ok(CanonicalRecord {
        name: format!("{} {}", user.name.first, user.name.last),
        data: RecordData::Text(user.email),
        source: Source::Users,
    })
}
