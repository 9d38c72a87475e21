use chrono::NaiveDate;
use url::form_urlencoded;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters narrowing a dones listing.
///
/// Only options that were supplied end up on the wire; defaults for `page`
/// and `page_size` are applied by the display code, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoneFilter {
    /// Team short identifier (already resolved from its display name).
    pub team: Option<String>,
    pub owner: Option<String>,
    pub done_date: Option<NaiveDate>,
    pub done_date_after: Option<NaiveDate>,
    pub done_date_before: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub order_by: Option<String>,
    pub page_size: Option<u32>,
    pub page: Option<u32>,
}

impl DoneFilter {
    /// Key/value pairs in their fixed wire order, unset options omitted.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let date = |d: &Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string());

        [
            ("team", self.team.clone()),
            ("owner", self.owner.clone()),
            ("done_date", date(&self.done_date)),
            ("done_date_after", date(&self.done_date_after)),
            ("done_date_before", date(&self.done_date_before)),
            ("tags", self.joined_tags()),
            ("order_by", self.order_by.clone()),
            ("page_size", self.page_size.map(|n| n.to_string())),
            ("page", self.page.map(|n| n.to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }

    /// Encode as `key=value&...` (no leading `?`).
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size_or_default(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Tags form a set: duplicates are dropped, first occurrence wins.
    fn joined_tags(&self) -> Option<String> {
        let mut seen: Vec<&str> = Vec::new();
        for tag in self.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        (!seen.is_empty()).then(|| seen.join(","))
    }
}

/// Number of pages needed to show `count` items `page_size` at a time.
pub fn page_count(count: u64, page_size: u32) -> u64 {
    count.div_ceil(u64::from(page_size.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Option<NaiveDate> {
        Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
    }

    fn full_filter() -> DoneFilter {
        DoneFilter {
            team: Some("eng".into()),
            owner: Some("ada".into()),
            done_date: date("2024-03-01"),
            done_date_after: date("2024-02-01"),
            done_date_before: date("2024-04-01"),
            tags: vec!["api".into(), "infra".into()],
            order_by: Some("-done_date".into()),
            page_size: Some(20),
            page: Some(2),
        }
    }

    #[test]
    fn test_empty_filter() {
        let filter = DoneFilter::default();
        assert!(filter.pairs().is_empty());
        assert_eq!(filter.to_query(), "");
    }

    #[test]
    fn test_full_filter_order() {
        let keys: Vec<&str> = full_filter().pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "team",
                "owner",
                "done_date",
                "done_date_after",
                "done_date_before",
                "tags",
                "order_by",
                "page_size",
                "page",
            ]
        );
    }

    #[test]
    fn test_full_filter_query() {
        assert_eq!(
            full_filter().to_query(),
            "team=eng&owner=ada&done_date=2024-03-01&done_date_after=2024-02-01\
             &done_date_before=2024-04-01&tags=api%2Cinfra&order_by=-done_date\
             &page_size=20&page=2"
        );
    }

    #[test]
    fn test_unset_options_omitted() {
        let filter = DoneFilter {
            owner: Some("ada".into()),
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(filter.to_query(), "owner=ada&page=3");
    }

    #[test]
    fn test_query_is_stable() {
        let filter = full_filter();
        assert_eq!(filter.to_query(), filter.clone().to_query());
    }

    #[test]
    fn test_tags_deduplicated() {
        let filter = DoneFilter {
            tags: vec!["api".into(), "ops".into(), "api".into(), " ".into()],
            ..Default::default()
        };
        assert_eq!(filter.pairs(), vec![("tags", "api,ops".to_string())]);
    }

    #[test]
    fn test_defaults_not_on_wire() {
        let filter = DoneFilter::default();
        assert_eq!(filter.page_or_default(), 1);
        assert_eq!(filter.page_size_or_default(), 10);
        assert_eq!(filter.to_query(), "");
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(20, 10), 2);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(0, 10), 0);
    }

    mod properties {
        use super::super::*;
        use proptest::option;
        use proptest::prelude::*;

        const KEY_ORDER: [&str; 9] = [
            "team",
            "owner",
            "done_date",
            "done_date_after",
            "done_date_before",
            "tags",
            "order_by",
            "page_size",
            "page",
        ];

        fn arb_date() -> impl Strategy<Value = NaiveDate> {
            (1990i32..2100, 1u32..=12, 1u32..=28)
                .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
        }

        fn arb_filter() -> impl Strategy<Value = DoneFilter> {
            (
                option::of("[a-z]{1,8}"),
                option::of("[a-z]{1,8}"),
                option::of(arb_date()),
                option::of(arb_date()),
                option::of(arb_date()),
                prop::collection::vec("[a-z ]{0,5}", 0..4),
                option::of("-?[a-z_]{1,10}"),
                option::of(1u32..500),
                option::of(1u32..500),
            )
                .prop_map(
                    |(
                        team,
                        owner,
                        done_date,
                        done_date_after,
                        done_date_before,
                        tags,
                        order_by,
                        page_size,
                        page,
                    )| DoneFilter {
                        team,
                        owner,
                        done_date,
                        done_date_after,
                        done_date_before,
                        tags,
                        order_by,
                        page_size,
                        page,
                    },
                )
        }

        proptest! {
            #[test]
            fn keys_follow_fixed_order_and_skip_unset(filter in arb_filter()) {
                let has_tags = filter.tags.iter().any(|t| !t.trim().is_empty());
                let set = [
                    filter.team.is_some(),
                    filter.owner.is_some(),
                    filter.done_date.is_some(),
                    filter.done_date_after.is_some(),
                    filter.done_date_before.is_some(),
                    has_tags,
                    filter.order_by.is_some(),
                    filter.page_size.is_some(),
                    filter.page.is_some(),
                ];
                let expected: Vec<&str> = KEY_ORDER
                    .iter()
                    .zip(set)
                    .filter(|(_, present)| *present)
                    .map(|(key, _)| *key)
                    .collect();

                let keys: Vec<&str> = filter.pairs().into_iter().map(|(k, _)| k).collect();
                prop_assert_eq!(keys, expected);
                prop_assert_eq!(filter.to_query(), filter.clone().to_query());
            }

            #[test]
            fn tags_are_a_set(tags in prop::collection::vec("[a-c]{1,2}", 1..8)) {
                let filter = DoneFilter { tags: tags.clone(), ..Default::default() };
                let pairs = filter.pairs();
                prop_assert_eq!(pairs.len(), 1);

                let joined: Vec<&str> = pairs[0].1.split(',').collect();
                for tag in &tags {
                    prop_assert_eq!(joined.iter().filter(|t| **t == tag.as_str()).count(), 1);
                }
            }
        }
    }
}
