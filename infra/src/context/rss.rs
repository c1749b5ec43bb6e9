//! Latest blog posts from an RSS or Atom feed
//!
//! Items are pulled out with regular expressions; only titles, links and
//! dates are needed.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use ns_core::{ContextFetcher, DomainResult};
use ns_shared::sanitize::sanitize_text;

use crate::http::{build_client, read_body};
use crate::InfrastructureError;

const PROVIDER: &str = "Blog feed";
const POST_LIMIT: usize = 5;

static ITEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<item\b[^>]*>(.*?)</item>|<entry\b[^>]*>(.*?)</entry>").expect("item regex is valid")
});
static TITLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").expect("title regex is valid"));
static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<link\b[^>]*href="([^"]+)"[^>]*/?>|<link\b[^>]*>(.*?)</link>"#).expect("link regex is valid")
});
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(?:pubDate|published|updated)\b[^>]*>(.*?)</(?:pubDate|published|updated)>")
        .expect("date regex is valid")
});
static CDATA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("cdata regex is valid"));

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FeedPost {
    pub title: String,
    pub link: Option<String>,
    pub published: Option<String>,
}

fn unwrap_text(raw: &str) -> String {
    let text = CDATA_REGEX.replace_all(raw, "$1");
    let decoded = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&");
    sanitize_text(&decoded, 300)
}

/// Extract up to `limit` posts from an RSS or Atom document
pub(crate) fn parse_feed(xml: &str, limit: usize) -> Vec<FeedPost> {
    ITEM_REGEX
        .captures_iter(xml)
        .filter_map(|caps| {
            let body = caps.get(1).or_else(|| caps.get(2))?.as_str();
            let title = TITLE_REGEX
                .captures(body)
                .and_then(|c| c.get(1))
                .map(|m| unwrap_text(m.as_str()))
                .filter(|t| !t.is_empty())?;
            let link = LINK_REGEX.captures(body).and_then(|c| {
                c.get(1)
                    .or_else(|| c.get(2))
                    .map(|m| unwrap_text(m.as_str()))
                    .filter(|l| !l.is_empty())
            });
            let published = DATE_REGEX
                .captures(body)
                .and_then(|c| c.get(1))
                .map(|m| unwrap_text(m.as_str()))
                .filter(|d| !d.is_empty());
            Some(FeedPost {
                title,
                link,
                published,
            })
        })
        .take(limit)
        .collect()
}

pub(crate) fn summarize_posts(posts: &[FeedPost]) -> String {
    let lines: Vec<String> = posts
        .iter()
        .map(|p| {
            let mut line = format!("- {}", p.title);
            if let Some(date) = &p.published {
                line.push_str(&format!(" ({})", date));
            }
            if let Some(link) = &p.link {
                line.push_str(&format!(" {}", link));
            }
            line
        })
        .collect();
    format!("Latest posts:\n{}", lines.join("\n"))
}

pub struct RssFeedFetcher {
    client: reqwest::Client,
    feed_url: Option<String>,
}

impl RssFeedFetcher {
    pub fn new(feed_url: Option<String>, timeout: Duration) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_client(timeout)?,
            feed_url,
        })
    }

    async fn fetch_posts(&self) -> Result<String, InfrastructureError> {
        let url = self
            .feed_url
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("BLOG_FEED_URL is not set".to_string()))?;

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/rss+xml, application/atom+xml, application/xml;q=0.9",
            )
            .send()
            .await
            .map_err(|e| InfrastructureError::request(PROVIDER, e))?;
        let xml = read_body(PROVIDER, response).await?;

        let posts = parse_feed(&xml, POST_LIMIT);
        if posts.is_empty() {
            return Err(InfrastructureError::parse(PROVIDER, "feed has no items"));
        }
        Ok(summarize_posts(&posts))
    }
}

#[async_trait]
impl ContextFetcher for RssFeedFetcher {
    fn source(&self) -> &str {
        "blog"
    }

    async fn fetch(&self) -> DomainResult<String> {
        Ok(self.fetch_posts().await?)
    }

    fn fallback(&self) -> String {
        "Our team publishes practical guides on local SEO, paid search and web performance.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>Northstar Blog</title>
  <link>https://northstar.test/blog</link>
  <item>
    <title><![CDATA[Local SEO & Google Business Profiles]]></title>
    <link>https://northstar.test/blog/local-seo</link>
    <pubDate>Tue, 30 Apr 2024 09:00:00 GMT</pubDate>
  </item>
  <item>
    <title>Core Web Vitals &amp; you</title>
    <link>https://northstar.test/blog/cwv</link>
  </item>
  <item><description>no title here</description></item>
</channel></rss>"#;

    const ATOM: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Northstar</title>
  <entry>
    <title type="html">Paid search budgets</title>
    <link rel="alternate" href="https://northstar.test/blog/ppc"/>
    <updated>2024-04-01T00:00:00Z</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let posts = parse_feed(RSS, 5);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Local SEO & Google Business Profiles");
        assert_eq!(posts[0].link.as_deref(), Some("https://northstar.test/blog/local-seo"));
        assert_eq!(posts[0].published.as_deref(), Some("Tue, 30 Apr 2024 09:00:00 GMT"));
        assert_eq!(posts[1].title, "Core Web Vitals & you");
        assert!(posts[1].published.is_none());
    }

    #[test]
    fn test_parse_atom() {
        let posts = parse_feed(ATOM, 5);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Paid search budgets");
        assert_eq!(posts[0].link.as_deref(), Some("https://northstar.test/blog/ppc"));
        assert_eq!(posts[0].published.as_deref(), Some("2024-04-01T00:00:00Z"));
    }

    #[test]
    fn test_limit_and_summary() {
        let posts = parse_feed(RSS, 1);
        assert_eq!(posts.len(), 1);
        assert_eq!(
            summarize_posts(&posts),
            "Latest posts:\n- Local SEO & Google Business Profiles (Tue, 30 Apr 2024 09:00:00 GMT) https://northstar.test/blog/local-seo"
        );
    }

    #[test]
    fn test_garbage_has_no_posts() {
        assert!(parse_feed("<html><body>not a feed</body></html>", 5).is_empty());
    }
}
