// src/sources/mod.rs
pub mod github;
pub mod posts;
pub mod users;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde_json::Value;
use thiserror::Error;

use crate::transform::CanonicalRecord;

/// The fixed set of upstream data providers. Adding a source means adding
/// a variant plus its module; every dispatch below is keyed on the enum.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Github,
    Posts,
    Users,
}

#[derive(Debug, Error)]
#[error("unknown source `{0}`")]
pub struct UnknownSource(String);

impl Source {
    /// Canonical source order. Drives fetch configuration, result-map
    /// iteration, and therefore final output ordering.
    pub const ALL: [Source; 3] = [Source::Github, Source::Posts, Source::Users];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Github => "github",
            Source::Posts => "posts",
            Source::Users => "users",
        }
    }

    /// Endpoint queried when no override is configured.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Source::Github => github::DEFAULT_ENDPOINT,
            Source::Posts => posts::DEFAULT_ENDPOINT,
            Source::Users => users::DEFAULT_ENDPOINT,
        }
    }

    /// Pull the item collection out of this source's payload shape.
    pub fn items<'a>(&self, payload: &'a Value) -> Result<&'a [Value]> {
        match self {
            Source::Github => github::items(payload),
            Source::Posts => posts::items(payload),
            Source::Users => users::items(payload),
        }
    }

    /// Project one of this source's items into the canonical record shape.
    pub fn project(&self, item: &Value) -> Result<CanonicalRecord> {
        match self {
            Source::Github => github::project(item),
            Source::Posts => posts::project(item),
            Source::Users => users::project(item),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(Source::Github),
            "posts" => Ok(Source::Posts),
            "users" => Ok(Source::Users),
            _ => Err(UnknownSource(s.to_string())),
        }
    }
}
