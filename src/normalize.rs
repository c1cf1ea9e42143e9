//! Canonical news item shape and the per-provider normalization steps.
//!
//! Tag stripping here is a snippet cleaner for provider search results. It
//! removes anything shaped like `<...>` and nothing else: entities stay
//! encoded and malformed or nested markup is not handled. It is not an HTML
//! sanitizer.

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::providers::naver::NaverItem;
use crate::providers::newsapi::Article;

/// Source label for Naver items, which carry no publisher name
pub const NAVER_SOURCE: &str = "네이버 뉴스";
/// Fallback label for NewsAPI articles with an empty source name
pub const NEWSAPI_SOURCE: &str = "NewsAPI";

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is a valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: String,
    pub source: String,
}

impl NewsItem {
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_published_at(&self.published_at)
    }
}

impl From<Article> for NewsItem {
    fn from(article: Article) -> Self {
        let source = match article.source.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => NEWSAPI_SOURCE.to_string(),
        };

        Self {
            title: strip_html_tags(article.title.as_deref().unwrap_or_default()),
            link: article.url,
            description: strip_html_tags(article.description.as_deref().unwrap_or_default()),
            published_at: article.published_at,
            source,
        }
    }
}

impl From<NaverItem> for NewsItem {
    fn from(item: NaverItem) -> Self {
        Self {
            title: strip_html_tags(&item.title),
            link: item.link,
            description: strip_html_tags(&item.description),
            published_at: item.pub_date,
            source: NAVER_SOURCE.to_string(),
        }
    }
}

/// Remove every `<...>` run from `text`.
pub fn strip_html_tags(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Parse a provider timestamp.
///
/// NewsAPI sends RFC 3339 (`2024-12-09T12:00:00Z`), Naver sends RFC 2822
/// (`Mon, 09 Dec 2024 21:00:00 +0900`). Anything else yields `None`.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Newest-first ordering on parsed timestamps; unparseable sorts last.
pub fn newest_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::newsapi::ArticleSource;
    use chrono::TimeZone;

    fn article(source_name: Option<&str>, description: Option<&str>) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: source_name.map(|s| s.to_string()),
            },
            author: None,
            title: Some("<b>KOSPI</b> rallies".to_string()),
            description: description.map(|d| d.to_string()),
            url: "https://news.example.com/1".to_string(),
            url_to_image: None,
            published_at: "2024-12-09T12:00:00Z".to_string(),
            content: None,
        }
    }

    mod strip_html_tags_tests {
        use super::*;

        #[test]
        fn test_strips_bold_tags() {
            assert_eq!(strip_html_tags("<b>Up</b> 3%"), "Up 3%");
        }

        #[test]
        fn test_plain_text_unchanged() {
            assert_eq!(strip_html_tags("No markup here"), "No markup here");
        }

        #[test]
        fn test_strips_tags_with_attributes() {
            assert_eq!(
                strip_html_tags(r#"<a href="https://x.com">link</a> text"#),
                "link text"
            );
        }

        #[test]
        fn test_entities_are_kept() {
            assert_eq!(strip_html_tags("&quot;<b>삼성</b>&quot;"), "&quot;삼성&quot;");
        }

        #[test]
        fn test_unclosed_tag_is_kept() {
            assert_eq!(strip_html_tags("price < 100"), "price < 100");
        }

        #[test]
        fn test_empty_brackets_are_kept() {
            assert_eq!(strip_html_tags("a <> b"), "a <> b");
        }
    }

    mod parse_published_at_tests {
        use super::*;

        #[test]
        fn test_parses_rfc3339() {
            let parsed = parse_published_at("2024-12-09T12:00:00Z").unwrap();
            assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 12, 9, 12, 0, 0).unwrap());
        }

        #[test]
        fn test_parses_rfc2822_with_offset() {
            let parsed = parse_published_at("Mon, 09 Dec 2024 21:00:00 +0900").unwrap();
            assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 12, 9, 12, 0, 0).unwrap());
        }

        #[test]
        fn test_trims_whitespace() {
            assert!(parse_published_at("  2024-12-09T12:00:00Z ").is_some());
        }

        #[test]
        fn test_rejects_garbage() {
            assert_eq!(parse_published_at("yesterday"), None);
            assert_eq!(parse_published_at(""), None);
            assert_eq!(parse_published_at("2024-12-09"), None);
        }
    }

    mod newest_first_tests {
        use super::*;

        #[test]
        fn test_orders_newer_before_older() {
            let older = parse_published_at("2024-12-09T10:00:00Z");
            let newer = parse_published_at("2024-12-09T12:00:00Z");
            assert_eq!(newest_first(&newer, &older), Ordering::Less);
            assert_eq!(newest_first(&older, &newer), Ordering::Greater);
        }

        #[test]
        fn test_unparseable_sorts_last() {
            let valid = parse_published_at("2024-12-09T10:00:00Z");
            assert_eq!(newest_first(&valid, &None), Ordering::Less);
            assert_eq!(newest_first(&None, &valid), Ordering::Greater);
            assert_eq!(newest_first(&None, &None), Ordering::Equal);
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_article_uses_source_name() {
            let item = NewsItem::from(article(Some("Yonhap"), Some("<i>Up</i> 3%")));
            assert_eq!(item.title, "KOSPI rallies");
            assert_eq!(item.description, "Up 3%");
            assert_eq!(item.link, "https://news.example.com/1");
            assert_eq!(item.source, "Yonhap");
        }

        #[test]
        fn test_article_without_description_or_source() {
            let item = NewsItem::from(article(None, None));
            assert_eq!(item.description, "");
            assert_eq!(item.source, NEWSAPI_SOURCE);
        }

        #[test]
        fn test_article_blank_source_falls_back() {
            let item = NewsItem::from(article(Some("  "), None));
            assert_eq!(item.source, NEWSAPI_SOURCE);
        }

        #[test]
        fn test_naver_item_normalized() {
            let item = NewsItem::from(NaverItem {
                title: "<b>삼성전자</b> 상승".to_string(),
                originallink: "https://origin.example.com/a".to_string(),
                link: "https://n.news.naver.com/a".to_string(),
                description: "<b>Up</b> 3%".to_string(),
                pub_date: "Mon, 09 Dec 2024 21:00:00 +0900".to_string(),
            });

            assert_eq!(item.title, "삼성전자 상승");
            assert_eq!(item.link, "https://n.news.naver.com/a");
            assert_eq!(item.description, "Up 3%");
            assert_eq!(item.source, "네이버 뉴스");
            assert!(item.published().is_some());
        }

        #[test]
        fn test_serializes_camel_case() {
            let item = NewsItem::from(article(Some("Yonhap"), None));
            let json = serde_json::to_value(&item).unwrap();
            assert_eq!(json["publishedAt"], "2024-12-09T12:00:00Z");
            assert_eq!(json["source"], "Yonhap");
        }
    }
}
