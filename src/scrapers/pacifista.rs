//! Pacifista extractor.
//!
//! The post sitemap mixes real articles with uploaded assets and spam
//! entries (percent-encoded Cyrillic slugs from an old site compromise),
//! so discovery filters hard before fetching: no `/wp-content/`, no image
//! files, ASCII-only URLs, and the path must belong to one of the site's
//! real sections. Markup is unstable, so every field has a fallback chain.
//! Pacifista has no sections of its own; records carry `"general"`.

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use crate::scrapers::{
    H1, META_AUTHOR, META_DESCRIPTION, META_PUBLISHED, element_text, fetch_text,
    first_container, first_select_text, meta_content, paragraph_texts, select_text,
    sitemap_locs,
};
use crate::utils::{dedup_urls, flatten_body, join_tags};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

static TITLE_TAG: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("selector"));
static SUBTITLE_H2: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2.subtitle").expect("selector"));
static SUBTITLE_DIV: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.subtitle").expect("selector"));
static SUBTITLE_P: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.subtitle").expect("selector"));
static TIME_TAG: Lazy<Selector> = Lazy::new(|| Selector::parse("time").expect("selector"));
static AUTHOR_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[rel="author"]"#).expect("selector"));
static ENTRY_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.entry-content").expect("selector"));
static POST_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.post-content").expect("selector"));
static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").expect("selector"));
static TAG_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[rel="tag"]"#).expect("selector"));

const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".png", ".jpeg", ".gif", ".webp"];
const SECTION_MARKERS: [&str; 7] = [
    "actualidad",
    "memoria",
    "violencias",
    "derechos",
    "post",
    "podcast",
    "blog",
];

pub struct Pacifista {
    sitemap_url: String,
}

impl Pacifista {
    pub fn new(sitemap_url: impl Into<String>) -> Self {
        Self {
            sitemap_url: sitemap_url.into(),
        }
    }
}

#[async_trait]
impl Extractor for Pacifista {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError> {
        let xml = fetch_text(client, &self.sitemap_url).await?;
        let mut urls: Vec<String> = dedup_urls(sitemap_locs(&self.sitemap_url, &xml)?)
            .into_iter()
            .filter(|u| keep_url(u))
            .collect();
        urls.truncate(limit);
        info!(count = urls.len(), "Indexed Pacifista article URLs");

        let mut articles = Vec::new();
        for url in urls {
            match fetch_text(client, &url).await {
                Ok(html) => articles.push(parse_article(&url, &html)),
                Err(e) => warn!(%url, error = %e, "Skipping Pacifista article"),
            }
        }
        info!(count = articles.len(), "Fetched Pacifista articles");
        Ok(articles)
    }
}

/// Whether a sitemap entry looks like a real article URL.
fn keep_url(url: &str) -> bool {
    let lower = url.to_lowercase();

    if lower.contains("/wp-content/") {
        return false;
    }
    if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return false;
    }
    // Percent-encoded Cyrillic slugs are spam leftovers.
    if lower.contains("%d0%") || lower.contains("%d1%") || lower.contains("%d2%") {
        return false;
    }
    if !url.is_ascii() {
        return false;
    }
    SECTION_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn parse_article(url: &str, html: &str) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = select_text(&doc, &H1).or_else(|| select_text(&doc, &TITLE_TAG));
    let subtitle = first_select_text(&doc, &[&SUBTITLE_H2, &SUBTITLE_DIV, &SUBTITLE_P])
        .or_else(|| meta_content(&doc, &META_DESCRIPTION));
    let date_published =
        meta_content(&doc, &META_PUBLISHED).or_else(|| select_text(&doc, &TIME_TAG));
    let author = meta_content(&doc, &META_AUTHOR).or_else(|| select_text(&doc, &AUTHOR_LINK));
    let tag_texts: Vec<String> = doc.select(&TAG_LINKS).map(element_text).collect();
    let body = first_container(&doc, &[&ENTRY_CONTENT, &POST_CONTENT, &ARTICLE])
        .map(paragraph_texts)
        .filter(|paras| !paras.is_empty())
        .and_then(|paras| flatten_body(&paras.join("\n")));

    ParsedArticle {
        url: url.to_string(),
        title,
        subtitle,
        date_published,
        body,
        author,
        section: "general".to_string(),
        tags: join_tags(&tag_texts),
    }
}
