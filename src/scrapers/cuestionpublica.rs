//! Cuestión Pública extractor.
//!
//! Discovery starts at the sitemap index, keeps the sub-sitemaps that
//! carry posts, and walks each one. A sub-sitemap that fails to download
//! is skipped; only the index itself is load-bearing.

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use crate::scrapers::{
    H1, META_AUTHOR, META_PUBLISHED, element_text, fetch_text, first_container,
    first_select_text, meta_content, paragraph_texts, select_text, sitemap_locs,
};
use crate::utils::{dedup_urls, flatten_body, join_tags};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

static ENTRY_SUMMARY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("section.entry-summary").expect("selector"));
static SUBTITLE_DIV: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.subtitle").expect("selector"));
static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").expect("selector"));
static ENTRY_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.entry-content").expect("selector"));
static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").expect("selector"));
static TAGS_BOX: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.tags a").expect("selector"));

pub struct CuestionPublica {
    sitemap_index_url: String,
}

impl CuestionPublica {
    pub fn new(sitemap_index_url: impl Into<String>) -> Self {
        Self {
            sitemap_index_url: sitemap_index_url.into(),
        }
    }
}

#[async_trait]
impl Extractor for CuestionPublica {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError> {
        let index_xml = fetch_text(client, &self.sitemap_index_url).await?;
        let post_sitemaps: Vec<String> = sitemap_locs(&self.sitemap_index_url, &index_xml)?
            .into_iter()
            .filter(|u| is_post_sitemap(u))
            .collect();

        let mut discovered = Vec::new();
        for sitemap_url in &post_sitemaps {
            match fetch_text(client, sitemap_url).await {
                Ok(xml) => discovered.extend(sitemap_locs(sitemap_url, &xml)?),
                Err(e) => warn!(%sitemap_url, error = %e, "Skipping Cuestión Pública sub-sitemap"),
            }
        }

        let mut urls = dedup_urls(discovered);
        urls.truncate(limit);
        info!(count = urls.len(), "Indexed Cuestión Pública article URLs");

        let mut articles = Vec::new();
        for url in urls {
            match fetch_text(client, &url).await {
                Ok(html) => articles.push(parse_article(&url, &html)),
                Err(e) => warn!(%url, error = %e, "Skipping Cuestión Pública article"),
            }
        }
        info!(count = articles.len(), "Fetched Cuestión Pública articles");
        Ok(articles)
    }
}

fn is_post_sitemap(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("post") || lower.contains("cuestion")
}

fn parse_article(url: &str, html: &str) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = select_text(&doc, &H1);
    let date_published = meta_content(&doc, &META_PUBLISHED);
    let author = meta_content(&doc, &META_AUTHOR);
    let subtitle = first_select_text(&doc, &[&ENTRY_SUMMARY, &SUBTITLE_DIV, &H2]);
    let tag_texts: Vec<String> = doc.select(&TAGS_BOX).map(element_text).collect();
    let body = first_container(&doc, &[&ENTRY_CONTENT, &ARTICLE])
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
        section: "politica".to_string(),
        tags: join_tags(&tag_texts),
    }
}
