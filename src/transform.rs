// src/transform.rs
use std::fmt;

use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::normalize::TaggedItem;
use crate::sources::Source;

/// Uniform output shape shared by every source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub name: String,
    pub data: RecordData,
    pub source: Source,
}

/// Source-dependent `data` column: free text for most sources, the bare
/// numeric id for posts. Untagged, so JSON output is a plain string or
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordData {
    Id(u64),
    Text(String),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Id(id) => write!(f, "{id}"),
            RecordData::Text(s) => f.write_str(s),
        }
    }
}

/// Project each tagged item through its source's rules, lazily. An item
/// that fails its source's typed decode is logged and dropped; the rest of
/// the stream continues.
pub fn transform<'a, I>(items: I) -> impl Iterator<Item = CanonicalRecord> + 'a
where
    I: Iterator<Item = TaggedItem<'a>> + 'a,
{
    items.filter_map(|tagged| match tagged.source.project(tagged.item) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(
                source = tagged.source.as_str(),
                error = %e,
                "dropping item that failed projection"
            );
            counter!("transform_malformed_items_total").increment(1);
            None
        }
    })
}
