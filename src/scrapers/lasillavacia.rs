//! La Silla Vacía extractor.
//!
//! Discovery walks every sub-sitemap of the index, drops asset entries,
//! and keeps politics URLs (excluding the podcast feed). A sub-sitemap
//! that fails to download or parse is skipped.

use crate::extract::{ExtractError, Extractor};
use crate::models::ParsedArticle;
use crate::scrapers::{
    H1, META_DESCRIPTION, META_PUBLISHED, element_text, fetch_text, first_container,
    first_select_text, meta_content, paragraph_texts, select_text, sitemap_locs,
};
use crate::utils::{dedup_urls, flatten_body, join_tags};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

static H1_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.title").expect("selector"));
static TITLE_TAG: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("selector"));
static TIME_DATETIME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time[datetime]").expect("selector"));
static AUTHOR_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".article__author-name").expect("selector"));
static ENTRY_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".entry-content").expect("selector"));
static ARTICLE_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".article__body").expect("selector"));
static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").expect("selector"));
static TAGS_BOX: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.field--name-field-tags a").expect("selector"));

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".png", ".jpeg", ".gif"];

pub struct LaSillaVacia {
    sitemap_index_url: String,
}

impl LaSillaVacia {
    pub fn new(sitemap_index_url: impl Into<String>) -> Self {
        Self {
            sitemap_index_url: sitemap_index_url.into(),
        }
    }
}

#[async_trait]
impl Extractor for LaSillaVacia {
    async fn extract(
        &self,
        client: &Client,
        limit: usize,
    ) -> Result<Vec<ParsedArticle>, ExtractError> {
        let index_xml = fetch_text(client, &self.sitemap_index_url).await?;
        let sub_sitemaps = sitemap_locs(&self.sitemap_index_url, &index_xml)?;

        let mut discovered = Vec::new();
        for sitemap_url in &sub_sitemaps {
            let xml = match fetch_text(client, sitemap_url).await {
                Ok(xml) => xml,
                Err(e) => {
                    warn!(%sitemap_url, error = %e, "Skipping La Silla Vacía sub-sitemap");
                    continue;
                }
            };
            match sitemap_locs(sitemap_url, &xml) {
                Ok(locs) => discovered.extend(locs.into_iter().filter(|u| is_content_url(u))),
                Err(e) => warn!(%sitemap_url, error = %e, "Skipping unparseable sub-sitemap"),
            }
        }

        let mut urls: Vec<String> = dedup_urls(discovered)
            .into_iter()
            .filter(|u| is_politics_url(u))
            .collect();
        urls.truncate(limit);
        info!(count = urls.len(), "Indexed La Silla Vacía article URLs");

        let mut articles = Vec::new();
        for url in urls {
            match fetch_text(client, &url).await {
                Ok(html) => articles.push(parse_article(&url, &html)),
                Err(e) => warn!(%url, error = %e, "Skipping La Silla Vacía article"),
            }
        }
        info!(count = articles.len(), "Fetched La Silla Vacía articles");
        Ok(articles)
    }
}

fn is_content_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    !lower.contains("/wp-content/")
        && !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn is_politics_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("politica") && !lower.contains("/podcasts/")
}

fn parse_article(url: &str, html: &str) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = first_select_text(&doc, &[&H1_TITLE, &H1, &TITLE_TAG]);
    let subtitle = meta_content(&doc, &META_DESCRIPTION);
    let date_published = meta_content(&doc, &META_PUBLISHED).or_else(|| {
        doc.select(&TIME_DATETIME)
            .next()
            .and_then(|t| t.value().attr("datetime"))
            .map(str::to_string)
    });
    let author = select_text(&doc, &AUTHOR_NAME);
    let tag_texts: Vec<String> = doc.select(&TAGS_BOX).map(element_text).collect();
    let body = first_container(&doc, &[&ENTRY_CONTENT, &ARTICLE_BODY, &ARTICLE])
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_content_url() {
        assert!(is_content_url("https://www.lasillavacia.com/politica/nota"));
        assert!(!is_content_url("https://www.lasillavacia.com/wp-content/uploads/x.pdf"));
        assert!(!is_content_url("https://www.lasillavacia.com/fotos/imagen.JPG"));
    }

    #[test]
    fn test_is_politics_url_excludes_podcasts() {
        assert!(is_politics_url("https://www.lasillavacia.com/politica/eleccion"));
        assert!(!is_politics_url("https://www.lasillavacia.com/podcasts/politica-al-oido"));
        assert!(!is_politics_url("https://www.lasillavacia.com/economia/nota"));
    }

    #[test]
    fn test_parse_article_datetime_attribute_fallback() {
        let html = r#"
            <h1 class="title">La movida del día</h1>
            <meta name="description" content="Bajada">
            <time datetime="2024-08-01T06:00:00-05:00">hace dos horas</time>
            <span class="article__author-name">Equipo La Silla</span>
            <div class="article__body"><p>Uno.</p><p>Dos.</p></div>"#;

        let article = parse_article("https://www.lasillavacia.com/politica/movida", html);
        assert_eq!(article.title.as_deref(), Some("La movida del día"));
        assert_eq!(article.subtitle.as_deref(), Some("Bajada"));
        assert_eq!(
            article.date_published.as_deref(),
            Some("2024-08-01T06:00:00-05:00")
        );
        assert_eq!(article.author.as_deref(), Some("Equipo La Silla"));
        assert_eq!(article.body.as_deref(), Some("Uno. Dos."));
        assert_eq!(article.tags, None);
    }
}
