//! La Vorágine extractor: post sitemap filtered to `/politica/` URLs.

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use crate::scrapers::{
    H1, META_AUTHOR, META_PUBLISHED, element_text, fetch_text, meta_content, paragraph_texts,
    select_text, sitemap_locs,
};
use crate::utils::{dedup_urls, flatten_body, join_tags};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

static SUBTITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2.subtitle").expect("selector"));
static AUTHOR_SPAN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.author-name").expect("selector"));
static TAGS_BOX: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.tags a").expect("selector"));
static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").expect("selector"));

pub struct LaVoragine {
    sitemap_url: String,
}

impl LaVoragine {
    pub fn new(sitemap_url: impl Into<String>) -> Self {
        Self {
            sitemap_url: sitemap_url.into(),
        }
    }
}

#[async_trait]
impl Extractor for LaVoragine {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError> {
        let xml = fetch_text(client, &self.sitemap_url).await?;
        let mut urls: Vec<String> = dedup_urls(sitemap_locs(&self.sitemap_url, &xml)?)
            .into_iter()
            .filter(|u| u.contains("/politica/"))
            .collect();
        urls.truncate(limit);
        info!(count = urls.len(), "Indexed La Vorágine article URLs");

        let mut articles = Vec::new();
        for url in urls {
            match fetch_text(client, &url).await {
                Ok(html) => articles.push(parse_article(&url, &html)),
                Err(e) => warn!(%url, error = %e, "Skipping La Vorágine article"),
            }
        }
        info!(count = articles.len(), "Fetched La Vorágine articles");
        Ok(articles)
    }
}

fn parse_article(url: &str, html: &str) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = select_text(&doc, &H1);
    let subtitle = select_text(&doc, &SUBTITLE);
    // Meta author first, visible byline as fallback.
    let author = meta_content(&doc, &META_AUTHOR).or_else(|| select_text(&doc, &AUTHOR_SPAN));
    let date_published = meta_content(&doc, &META_PUBLISHED);
    let tag_texts: Vec<String> = doc.select(&TAGS_BOX).map(element_text).collect();
    let body = doc
        .select(&ARTICLE)
        .next()
        .map(paragraph_texts)
        .filter(|paras| !paras.is_empty())
        .and_then(|paras| flatten_body(&paras.join("\n\n")));

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_article_meta_author_wins() {
        let html = r#"
            <head>
              <meta name="author" content="Equipo Vorágine">
              <meta property="article:published_time" content="2024-02-20T12:00:00-05:00">
            </head>
            <h1>Investigación</h1>
            <h2 class="subtitle">Lo que encontramos</h2>
            <span class="author-name">Otro Nombre</span>
            <article><p>Uno.</p><p>Dos.</p></article>"#;

        let article = parse_article("https://voragine.co/politica/investigacion", html);
        assert_eq!(article.author.as_deref(), Some("Equipo Vorágine"));
        assert_eq!(article.subtitle.as_deref(), Some("Lo que encontramos"));
        assert_eq!(
            article.date_published.as_deref(),
            Some("2024-02-20T12:00:00-05:00")
        );
        assert_eq!(article.body.as_deref(), Some("Uno.  Dos."));
    }

    #[test]
    fn test_parse_article_byline_fallback() {
        let html = r#"
            <h1>Titular</h1>
            <span class="author-name">Carolina M.</span>"#;
        let article = parse_article("https://voragine.co/politica/nota", html);
        assert_eq!(article.author.as_deref(), Some("Carolina M."));
        assert_eq!(article.date_published, None);
    }
}
