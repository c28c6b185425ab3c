// src/normalize.rs
use metrics::counter;
use serde_json::Value;

use crate::fetch::types::FetchResult;
use crate::sources::Source;

/// An item drawn from one source's payload, annotated with its origin.
/// Lives only inside the lazy merge sequence; never stored.
#[derive(Debug, Clone, Copy)]
pub struct TaggedItem<'a> {
    pub source: Source,
    pub item: &'a Value,
}

/// Merge per-source payloads into one lazy tagged sequence: sources in
/// configured order, items in payload order. An absent payload contributes
/// nothing. A payload that does not match its source's expected shape is
/// logged and skipped; the remaining sources still normalize.
pub fn tagged_items(result: &FetchResult) -> impl Iterator<Item = TaggedItem<'_>> {
    result.iter().flat_map(|(source, payload)| {
        let items: &[Value] = match payload {
            Some(p) => match source.items(p) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(
                        source = source.as_str(),
                        error = %e,
                        "malformed payload, skipping source"
                    );
                    counter!("normalize_malformed_payloads_total").increment(1);
                    &[]
                }
            },
            None => &[],
        };
        items.iter().map(move |item| TaggedItem { source, item })
    })
}

/// Keep only items from `filter`; identity when no filter was requested.
/// Stateless, order-preserving, single pass.
pub fn filter_by_source<'a, I>(
    items: I,
    filter: Option<Source>,
) -> impl Iterator<Item = TaggedItem<'a>>
where
    I: Iterator<Item = TaggedItem<'a>>,
{
    items.filter(move |tagged| filter.map_or(true, |want| tagged.source == want))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_with_all_sources() -> FetchResult {
        FetchResult::new(vec![
            (
                Source::Github,
                Some(json!({ "items": [{ "name": "a" }, { "name": "b" }] })),
            ),
            (Source::Posts, Some(json!([{ "id": 1 }]))),
            (Source::Users, Some(json!({ "results": [{ "email": "x@y.z" }] }))),
        ])
    }

    #[test]
    fn tags_every_item_with_its_origin_in_configured_order() {
        let result = result_with_all_sources();
        let tags: Vec<Source> = tagged_items(&result).map(|t| t.source).collect();
        assert_eq!(
            tags,
            [
                Source::Github,
                Source::Github,
                Source::Posts,
                Source::Users
            ]
        );
    }

    #[test]
    fn preserves_intra_source_item_order() {
        let result = result_with_all_sources();
        let names: Vec<&str> = tagged_items(&result)
            .filter(|t| t.source == Source::Github)
            .map(|t| t.item["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn absent_payload_contributes_nothing() {
        let result = FetchResult::new(vec![
            (Source::Github, None),
            (Source::Posts, Some(json!([{ "id": 1 }, { "id": 2 }]))),
            (Source::Users, None),
        ]);
        let tags: Vec<Source> = tagged_items(&result).map(|t| t.source).collect();
        assert_eq!(tags, [Source::Posts, Source::Posts]);
    }

    #[test]
    fn malformed_payload_skips_only_that_source() {
        // github payload lacks its `items` wrapper
        let result = FetchResult::new(vec![
            (Source::Github, Some(json!({ "total_count": 1 }))),
            (Source::Posts, Some(json!([{ "id": 1 }]))),
            (Source::Users, Some(json!({ "results": [] }))),
        ]);
        let tags: Vec<Source> = tagged_items(&result).map(|t| t.source).collect();
        assert_eq!(tags, [Source::Posts]);
    }

    #[test]
    fn filter_keeps_matching_source_and_relative_order() {
        let result = result_with_all_sources();
        let filtered: Vec<&str> =
            filter_by_source(tagged_items(&result), Some(Source::Github))
                .map(|t| t.item["name"].as_str().unwrap())
                .collect();
        assert_eq!(filtered, ["a", "b"]);
    }

    #[test]
    fn no_filter_is_identity() {
        let result = result_with_all_sources();
        let all = filter_by_source(tagged_items(&result), None).count();
        assert_eq!(all, tagged_items(&result).count());
    }
}
