//! Cerosetenta (070) extractor.
//!
//! The topic listing links articles through anchors that wrap an `h2`
//! headline; the byline box carries both the author link and the
//! free-text publication date.

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use crate::scrapers::{A, element_text, fetch_text, paragraph_texts, select_text};
use crate::utils::{dedup_urls, flatten_body, join_tags};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").expect("selector"));
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.entry-title").expect("selector"));
static AUTHOR_BOX: Lazy<Selector> = Lazy::new(|| Selector::parse("div.autor").expect("selector"));
static AUTHOR_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("selector"));
static DATE_SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").expect("selector"));
static BODY_CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.entry-content").expect("selector"));
static TAGS_BOTTOM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.categorias_bottom").expect("selector"));
static TAGS_TOP: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.categorias_top").expect("selector"));

const SITE_PREFIX: &str = "https://cerosetenta.uniandes.edu.co/";

pub struct CeroSetenta {
    url_base: String,
}

impl CeroSetenta {
    pub fn new(url_base: impl Into<String>) -> Self {
        Self {
            url_base: url_base.into(),
        }
    }
}

#[async_trait]
impl Extractor for CeroSetenta {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError> {
        let listing = fetch_text(client, &self.url_base).await?;
        let mut urls = listing_urls(&listing);
        urls.truncate(limit);
        info!(count = urls.len(), "Indexed Cerosetenta article URLs");

        let mut articles = Vec::new();
        for url in urls {
            match fetch_text(client, &url).await {
                Ok(html) => articles.push(parse_article(&url, &html)),
                Err(e) => warn!(%url, error = %e, "Skipping Cerosetenta article"),
            }
        }
        info!(count = articles.len(), "Fetched Cerosetenta articles");
        Ok(articles)
    }
}

/// Article URLs from the topic listing: anchors that contain an `h2`
/// headline and point into the site.
fn listing_urls(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let urls = doc
        .select(&A)
        .filter(|a| a.select(&H2).next().is_some())
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with(SITE_PREFIX))
        .map(str::to_string)
        .collect();
    dedup_urls(urls)
}

fn parse_article(url: &str, html: &str) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = select_text(&doc, &TITLE);

    let author_box = doc.select(&AUTHOR_BOX).next();
    let author = author_box
        .and_then(|b| b.select(&AUTHOR_LINK).next())
        .map(element_text)
        .filter(|t| !t.is_empty());
    // Free-text date, e.g. "12 de marzo de 2024"; passed through as-is.
    let date_published = author_box
        .and_then(|b| b.select(&DATE_SPAN).next())
        .map(element_text)
        .filter(|t| !t.is_empty());

    let body = doc
        .select(&BODY_CONTAINER)
        .next()
        .map(paragraph_texts)
        .filter(|paras| !paras.is_empty())
        .and_then(|paras| flatten_body(&paras.join("\n\n")));

    // Category links double as tags; the politics link itself is noise.
    let tag_texts: Vec<String> = doc
        .select(&TAGS_BOTTOM)
        .next()
        .or_else(|| doc.select(&TAGS_TOP).next())
        .map(|container| {
            container
                .select(&AUTHOR_LINK)
                .filter(|a| {
                    !a.value()
                        .attr("href")
                        .is_some_and(|h| h.ends_with("/politica/"))
                })
                .map(element_text)
                .collect()
        })
        .unwrap_or_default();

    ParsedArticle {
        url: url.to_string(),
        title,
        subtitle: None,
        date_published,
        body,
        author,
        section: "politica".to_string(),
        tags: join_tags(&tag_texts),
    }
}
