//! Per-outlet extractors for Colombian political news sources.
//!
//! Each submodule implements [`Extractor`](crate::extract::Extractor) for
//! one outlet, following a consistent two-phase pattern:
//!
//! 1. **Discovery**: collect article URLs from the outlet's sitemap,
//!    sitemap index, or listing page.
//! 2. **Fetching**: download each article sequentially and parse it with a
//!    pure `parse_article(url, html)` function.
//!
//! # Supported outlets
//!
//! | Outlet | Module | Discovery | Espectro |
//! |--------|--------|-----------|----------|
//! | El Nuevo Siglo | [`el_nuevo_siglo`] | sitemap pages | derecha |
//! | La FM | [`lafm`] | listing page | derecha |
//! | La Vorágine | [`lavoragine`] | post sitemap | izquierda |
//! | Cerosetenta | [`cerosetenta`] | topic listing | izquierda |
//! | Semanario Voz | [`semanariovoz`] | category listing | izquierda |
//! | Cuestión Pública | [`cuestionpublica`] | sitemap index | centro |
//! | Pacifista | [`pacifista`] | post sitemap | centro |
//! | La Silla Vacía | [`lasillavacia`] | sitemap index | centro |
//!
//! # Common patterns
//!
//! - A failed fetch or parse of a single article is logged and skipped;
//!   a failed discovery fetch fails the whole job (the retry runner
//!   re-runs it).
//! - Discovered URLs are deduplicated in first-seen order and truncated to
//!   the shared `limit` before any article is fetched.
//! - Parsing is synchronous and separated from fetching, so every parser
//!   is unit-testable on fixture HTML.
//! - Output is normalized per [`crate::utils`] before returning.

use crate::extract::ExtractError;
use crate::utils::collapse_ws;
use once_cell::sync::Lazy;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

pub mod cerosetenta;
pub mod cuestionpublica;
pub mod el_nuevo_siglo;
pub mod lafm;
pub mod lasillavacia;
pub mod lavoragine;
pub mod pacifista;
pub mod semanariovoz;

// Selectors shared by several outlets.
pub(crate) static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("selector"));
pub(crate) static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("selector"));
pub(crate) static A: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("selector"));
pub(crate) static META_PUBLISHED: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="article:published_time"]"#).expect("selector")
});
pub(crate) static META_AUTHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="author"]"#).expect("selector"));
pub(crate) static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).expect("selector"));
pub(crate) static JSON_LD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).expect("selector"));

/// GET a URL and return its body, mapping transport and status failures
/// into [`ExtractError::Http`].
pub(crate) async fn fetch_text(client: &Client, url: &str) -> Result<String, ExtractError> {
    let http_err = |source: reqwest::Error| ExtractError::Http {
        url: url.to_string(),
        source,
    };

    client
        .get(url)
        .send()
        .await
        .map_err(http_err)?
        .error_for_status()
        .map_err(http_err)?
        .text()
        .await
        .map_err(http_err)
}

/// Collect the text of every `<loc>` element in a sitemap document.
///
/// Matches on local names, so namespaced sitemaps (`urlset` and
/// `sitemapindex` alike) need no namespace bookkeeping.
pub(crate) fn sitemap_locs(url: &str, xml: &str) -> Result<Vec<String>, ExtractError> {
    let sitemap_err = |reason: String| ExtractError::Sitemap {
        url: url.to_string(),
        reason,
    };

    let mut reader = Reader::from_str(xml);

    let mut locs = Vec::new();
    let mut in_loc = false;
    let mut current = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"loc" => {
                in_loc = true;
                current.clear();
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"loc" => {
                in_loc = false;
                let text = current.trim();
                if !text.is_empty() {
                    locs.push(text.to_string());
                }
                current.clear();
            }
            Ok(Event::Text(t)) if in_loc => {
                let text = t.xml_content().map_err(|e| sitemap_err(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::GeneralRef(r)) if in_loc => {
                let name = r.decode().map_err(|e| sitemap_err(e.to_string()))?;
                let entity = format!("&{};", name);
                let resolved =
                    quick_xml::escape::unescape(&entity).map_err(|e| sitemap_err(e.to_string()))?;
                current.push_str(&resolved);
            }
            Ok(Event::CData(t)) if in_loc => {
                current.push_str(&String::from_utf8_lossy(&t.into_inner()));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(sitemap_err(e.to_string())),
        }
    }
    Ok(locs)
}

/// Whitespace-normalized text content of one element.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    collapse_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// Text of the first element matching `selector`, `None` when absent or
/// blank.
pub(crate) fn select_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// `content` attribute of the first element matching `selector` (meta
/// tags), `None` when absent or blank.
pub(crate) fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Non-empty paragraph texts inside `container`, in document order.
pub(crate) fn paragraph_texts(container: ElementRef<'_>) -> Vec<String> {
    container
        .select(&P)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Try selectors in priority order; text of the first one that matches.
pub(crate) fn first_select_text(doc: &Html, selectors: &[&Selector]) -> Option<String> {
    selectors.iter().find_map(|sel| select_text(doc, sel))
}

/// Try selectors in priority order; texts of the first one with any
/// matches. Later selectors are fallbacks, not additions.
pub(crate) fn first_nonempty_texts(doc: &Html, selectors: &[&Selector]) -> Vec<String> {
    for sel in selectors {
        let texts: Vec<String> = doc
            .select(sel)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect();
        if !texts.is_empty() {
            return texts;
        }
    }
    Vec::new()
}

/// Try selectors in priority order; first matching element.
pub(crate) fn first_container<'a>(
    doc: &'a Html,
    selectors: &[&Selector],
) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|sel| doc.select(sel).next())
}

/// First JSON-LD script in the document, parsed. Unparseable scripts are
/// skipped, matching how outlets often ship one valid and one broken
/// block.
pub(crate) fn first_json_ld(doc: &Html) -> Option<serde_json::Value> {
    doc.select(&JSON_LD)
        .filter_map(|el| {
            let raw = el.text().collect::<String>();
            serde_json::from_str::<serde_json::Value>(&raw).ok()
        })
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sitemap_locs_plain() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset>
                <url><loc>https://example.com/politica/uno</loc></url>
                <url><loc>https://example.com/politica/dos</loc></url>
            </urlset>"#;

        let locs = sitemap_locs("https://example.com/sitemap.xml", xml).unwrap();
        assert_eq!(
            locs,
            vec![
                "https://example.com/politica/uno".to_string(),
                "https://example.com/politica/dos".to_string(),
            ]
        );
    }

    #[test]
    fn test_sitemap_locs_namespaced_index() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <sitemap><loc>https://example.com/post-sitemap.xml</loc></sitemap>
                <sitemap><loc>https://example.com/page-sitemap.xml</loc></sitemap>
            </sitemapindex>"#;

        let locs = sitemap_locs("https://example.com/sitemap_index.xml", xml).unwrap();
        assert_eq!(locs.len(), 2);
        assert_eq!(locs[0], "https://example.com/post-sitemap.xml");
    }

    #[test]
    fn test_sitemap_locs_unescapes_entities() {
        let xml = "<urlset><url><loc>https://example.com/?a=1&amp;b=2</loc></url></urlset>";
        let locs = sitemap_locs("https://example.com/sitemap.xml", xml).unwrap();
        assert_eq!(locs, vec!["https://example.com/?a=1&b=2".to_string()]);
    }

    #[test]
    fn test_sitemap_locs_rejects_broken_xml() {
        let xml = "<urlset><url><loc>https://example.com</url>";
        assert!(sitemap_locs("https://example.com/sitemap.xml", xml).is_err());
    }

    #[test]
    fn test_select_text_joins_and_trims() {
        let doc = Html::parse_document("<h1>  Hola   <b>mundo</b>  </h1>");
        assert_eq!(select_text(&doc, &H1), Some("Hola mundo".to_string()));
    }

    #[test]
    fn test_meta_content() {
        let doc = Html::parse_document(
            r#"<head><meta property="article:published_time" content="2024-05-01T10:00:00-05:00"></head>"#,
        );
        assert_eq!(
            meta_content(&doc, &META_PUBLISHED),
            Some("2024-05-01T10:00:00-05:00".to_string())
        );
        assert_eq!(meta_content(&doc, &META_AUTHOR), None);
    }

    #[test]
    fn test_first_json_ld_skips_broken_blocks() {
        let doc = Html::parse_document(
            r#"<script type="application/ld+json">{not json</script>
               <script type="application/ld+json">{"datePublished": "2024-01-01"}</script>"#,
        );
        let data = first_json_ld(&doc).unwrap();
        assert_eq!(data["datePublished"], "2024-01-01");
    }

    #[test]
    fn test_paragraph_texts_skips_blank() {
        let doc = Html::parse_document(
            "<div id='c'><p>uno</p><p>   </p><p>dos</p></div>",
        );
        let sel = Selector::parse("#c").unwrap();
        let container = doc.select(&sel).next().unwrap();
        assert_eq!(paragraph_texts(container), vec!["uno".to_string(), "dos".to_string()]);
    }
}
