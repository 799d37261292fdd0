//! Semanario Voz extractor.
//!
//! The category listing is built from theme module containers; article
//! pages vary between theme versions, so title, subtitle, date and tags
//! each get a fallback chain. The outlet prints no byline.

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use crate::scrapers::{
    META_PUBLISHED, fetch_text, first_nonempty_texts, first_select_text, meta_content,
    paragraph_texts, select_text,
};
use crate::utils::{dedup_urls, flatten_body, join_tags};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

static MODULE_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.td-module-container a[href]").expect("selector"));
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".tdb-title-text").expect("selector"));
static SUBTITLE_P: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.td-post-sub-title").expect("selector"));
static SUBTITLE_TDB: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".tdb-sub-title").expect("selector"));
static SUBTITLE_TD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".td-post-sub-title").expect("selector"));
static ENTRY_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time.entry-date").expect("selector"));
static BODY_CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".td-post-content").expect("selector"));
static TAGS_POST: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".td-post-tags a").expect("selector"));
static TAGS_UL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul.td-tags a").expect("selector"));
static TAGS_TDB: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".tdb-tags a").expect("selector"));

pub struct SemanarioVoz {
    url_base: String,
}

impl SemanarioVoz {
    pub fn new(url_base: impl Into<String>) -> Self {
        Self {
            url_base: url_base.into(),
        }
    }
}

#[async_trait]
impl Extractor for SemanarioVoz {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError> {
        let listing = fetch_text(client, &self.url_base).await?;
        let mut urls = listing_urls(&self.url_base, &listing);
        urls.truncate(limit);
        info!(count = urls.len(), "Indexed Semanario Voz article URLs");

        let mut articles = Vec::new();
        for url in urls {
            match fetch_text(client, &url).await {
                Ok(html) => articles.push(parse_article(&url, &html)),
                Err(e) => warn!(%url, error = %e, "Skipping Semanario Voz article"),
            }
        }
        info!(count = articles.len(), "Fetched Semanario Voz articles");
        Ok(articles)
    }
}

/// First link of every listing module, kept when it stays on the site.
fn listing_urls(url_base: &str, html: &str) -> Vec<String> {
    let origin = match Url::parse(url_base) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}://{}", parsed.scheme(), host),
            None => return Vec::new(),
        },
        Err(e) => {
            warn!(url_base, error = %e, "Invalid Semanario Voz base URL");
            return Vec::new();
        }
    };

    let doc = Html::parse_document(html);
    let urls = doc
        .select(&MODULE_ANCHORS)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with(&origin))
        .map(str::to_string)
        .collect();
    dedup_urls(urls)
}

fn parse_article(url: &str, html: &str) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = select_text(&doc, &TITLE);
    let subtitle = first_select_text(&doc, &[&SUBTITLE_P, &SUBTITLE_TDB, &SUBTITLE_TD]);
    let date_published =
        select_text(&doc, &ENTRY_DATE).or_else(|| meta_content(&doc, &META_PUBLISHED));
    let tag_texts = first_nonempty_texts(&doc, &[&TAGS_POST, &TAGS_UL, &TAGS_TDB]);
    let body = doc
        .select(&BODY_CONTAINER)
        .next()
        .map(paragraph_texts)
        .filter(|paras| !paras.is_empty())
        .and_then(|paras| flatten_body(&paras.join("\n")));

    ParsedArticle {
        url: url.to_string(),
        title,
        subtitle,
        date_published,
        body,
        author: None,
        section: "politica".to_string(),
        tags: join_tags(&tag_texts),
    }
}
