//! La FM extractor.
//!
//! No sitemap here: discovery scrapes the politics listing page and keeps
//! relative hrefs under `/politica/`, resolved against the site base.

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use crate::scrapers::{A, H1, META_PUBLISHED, element_text, fetch_text, meta_content, paragraph_texts, select_text};
use crate::utils::{dedup_urls, flatten_body, join_tags};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

static AUTHOR_BOX: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.author").expect("selector"));
static TAGS_BOX: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.tags a").expect("selector"));
static BODY_CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.news-content").expect("selector"));

pub struct LaFM {
    url_base: String,
}

impl LaFM {
    pub fn new(url_base: impl Into<String>) -> Self {
        Self {
            url_base: url_base.into(),
        }
    }
}

#[async_trait]
impl Extractor for LaFM {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError> {
        let listing = fetch_text(client, &self.url_base).await?;
        let mut urls = listing_urls(&self.url_base, &listing);
        urls.truncate(limit);
        info!(count = urls.len(), "Indexed La FM article URLs");

        let mut articles = Vec::new();
        for url in urls {
            match fetch_text(client, &url).await {
                Ok(html) => articles.push(parse_article(&url, &html)),
                Err(e) => warn!(%url, error = %e, "Skipping La FM article"),
            }
        }
        info!(count = articles.len(), "Fetched La FM articles");
        Ok(articles)
    }
}

/// Absolute URLs of politics articles linked from the listing page.
fn listing_urls(url_base: &str, html: &str) -> Vec<String> {
    let base = match Url::parse(url_base) {
        Ok(base) => base,
        Err(e) => {
            warn!(url_base, error = %e, "Invalid La FM base URL");
            return Vec::new();
        }
    };

    let doc = Html::parse_document(html);
    let urls = doc
        .select(&A)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with("/politica/"))
        .filter_map(|href| base.join(href).ok())
        .map(|resolved| resolved.to_string())
        .collect();
    dedup_urls(urls)
}

fn parse_article(url: &str, html: &str) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = select_text(&doc, &H1);
    let author = select_text(&doc, &AUTHOR_BOX);
    let date_published = meta_content(&doc, &META_PUBLISHED);
    let tag_texts: Vec<String> = doc.select(&TAGS_BOX).map(element_text).collect();
    let body = doc
        .select(&BODY_CONTAINER)
        .next()
        .map(paragraph_texts)
        .filter(|paras| !paras.is_empty())
        .and_then(|paras| flatten_body(&paras.join("\n\n")));

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
