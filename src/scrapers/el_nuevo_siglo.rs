//! El Nuevo Siglo extractor.
//!
//! Discovery walks the site's paginated sitemaps and keeps URLs whose path
//! mentions the politics section. Article pages put their body under
//! `div.field--name-field-free-text` and publish date and author in a
//! JSON-LD block (sometimes wrapped in an `@graph` array).

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use crate::scrapers::{
    H1, element_text, fetch_text, first_json_ld, paragraph_texts, select_text, sitemap_locs,
};
use crate::utils::{dedup_urls, flatten_body, join_tags};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

static ARTICLE_MAIN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.field--name-field-free-text").expect("selector"));
static SUBTITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, h3").expect("selector"));
static TAG_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[rel="tag"]"#).expect("selector"));

pub struct ElNuevoSiglo {
    sitemap_urls: Vec<String>,
    section_filter: &'static str,
}

impl ElNuevoSiglo {
    pub fn new(sitemap_urls: Vec<String>) -> Self {
        Self {
            sitemap_urls,
            section_filter: "politica",
        }
    }
}

#[async_trait]
impl Extractor for ElNuevoSiglo {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError> {
        let mut discovered = Vec::new();
        for sitemap_url in &self.sitemap_urls {
            let xml = fetch_text(client, sitemap_url).await?;
            discovered.extend(sitemap_locs(sitemap_url, &xml)?);
        }

        let mut urls: Vec<String> = dedup_urls(discovered)
            .into_iter()
            .filter(|u| u.to_lowercase().contains(self.section_filter))
            .collect();
        urls.truncate(limit);
        info!(count = urls.len(), "Indexed El Nuevo Siglo article URLs");

        let mut articles = Vec::new();
        for url in urls {
            match fetch_text(client, &url).await {
                Ok(html) => articles.push(parse_article(&url, &html)),
                Err(e) => warn!(%url, error = %e, "Skipping El Nuevo Siglo article"),
            }
        }
        info!(count = articles.len(), "Fetched El Nuevo Siglo articles");
        Ok(articles)
    }
}

fn parse_article(url: &str, html: &str) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = select_text(&doc, &H1);

    let article_main = doc.select(&ARTICLE_MAIN).next();

    // Subtitle and body only count inside the article container; the rest
    // of the page is navigation chrome full of h2s and paragraphs.
    let subtitle = article_main
        .and_then(|main| main.select(&SUBTITLE).next())
        .map(element_text)
        .filter(|t| !t.is_empty());

    let body = article_main
        .map(paragraph_texts)
        .filter(|paras| !paras.is_empty())
        .and_then(|paras| flatten_body(&paras.join("\n\n")));

    let (date_published, author) = match first_json_ld(&doc) {
        Some(data) => {
            let article_data = data.get("@graph").and_then(|g| g.get(0)).unwrap_or(&data);
            (
                article_data
                    .get("datePublished")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                article_data
                    .get("author")
                    .and_then(|a| a.get("name"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            )
        }
        None => (None, None),
    };

    let tag_texts: Vec<String> = doc.select(&TAG_LINKS).map(element_text).collect();

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
