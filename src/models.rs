//! Data models for scraped articles and the consolidated dataset.
//!
//! Two shapes flow through the pipeline:
//! - [`ParsedArticle`]: what one outlet's extractor produces, already
//!   normalized (tags joined, body flattened) but not yet attributed.
//! - [`ArticleRecord`]: one row of the consolidated table, carrying the
//!   outlet identity and its political orientation.
//!
//! An `ArticleRecord` can only be built by tagging a `ParsedArticle`, so
//! every consolidated row is guaranteed to name its outlet and spectrum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Political orientation label attached to every outlet in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Espectro {
    Izquierda,
    Centro,
    Derecha,
}

impl fmt::Display for Espectro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Espectro::Izquierda => "izquierda",
            Espectro::Centro => "centro",
            Espectro::Derecha => "derecha",
        };
        f.write_str(label)
    }
}

/// One article as extracted and normalized by an outlet's extractor.
///
/// Absent values are `None`; normalization never produces empty strings.
/// `tags` is a single comma-and-space-joined string and `body` is one
/// flattened paragraph (newlines replaced by spaces) by the time an
/// extractor returns the article.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedArticle {
    /// Canonical article URL, unique within one outlet's result set.
    pub url: String,
    pub title: Option<String>,
    /// Many outlets never populate this.
    pub subtitle: Option<String>,
    /// Outlet-formatted publication date; passed through verbatim
    /// (ISO-8601 for some outlets, free text for others).
    pub date_published: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    /// Usually a constant per outlet, e.g. `"politica"`.
    pub section: String,
    pub tags: Option<String>,
}

impl ParsedArticle {
    /// Attach outlet identity and orientation, producing a consolidated row.
    pub fn tagged(self, medio: &str, espectro: Espectro) -> ArticleRecord {
        ArticleRecord {
            url: self.url,
            title: self.title,
            subtitle: self.subtitle,
            date_published: self.date_published,
            body: self.body,
            author: self.author,
            section: self.section,
            tags: self.tags,
            medio: medio.to_string(),
            espectro_politico: espectro,
        }
    }
}

/// One row of the consolidated table.
///
/// Field order here is the column order of the output CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub date_published: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub section: String,
    pub tags: Option<String>,
    /// Outlet identifier, attached by the aggregator.
    pub medio: String,
    /// Orientation label from the source registry, attached by the aggregator.
    pub espectro_politico: Espectro,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_attaches_outlet_identity() {
        let parsed = ParsedArticle {
            url: "https://example.com/politica/nota".to_string(),
            title: Some("Titular".to_string()),
            section: "politica".to_string(),
            ..Default::default()
        };

        let record = parsed.tagged("ElNuevoSiglo", Espectro::Derecha);
        assert_eq!(record.medio, "ElNuevoSiglo");
        assert_eq!(record.espectro_politico, Espectro::Derecha);
        assert_eq!(record.url, "https://example.com/politica/nota");
        assert_eq!(record.title.as_deref(), Some("Titular"));
    }

    #[test]
    fn test_tagged_preserves_normalized_fields() {
        let parsed = ParsedArticle {
            url: "https://example.com/a".to_string(),
            body: Some("un solo parrafo plano".to_string()),
            tags: Some("paz, congreso".to_string()),
            section: "politica".to_string(),
            ..Default::default()
        };

        let record = parsed.tagged("LaVoragine", Espectro::Izquierda);
        assert_eq!(record.body.as_deref(), Some("un solo parrafo plano"));
        assert_eq!(record.tags.as_deref(), Some("paz, congreso"));
        assert_eq!(record.subtitle, None);
    }

    #[test]
    fn test_espectro_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Espectro::Izquierda).unwrap(),
            "\"izquierda\""
        );
        assert_eq!(
            serde_json::to_string(&Espectro::Centro).unwrap(),
            "\"centro\""
        );
        assert_eq!(
            serde_json::to_string(&Espectro::Derecha).unwrap(),
            "\"derecha\""
        );
    }

    #[test]
    fn test_espectro_display_matches_serde() {
        for espectro in [Espectro::Izquierda, Espectro::Centro, Espectro::Derecha] {
            let json = serde_json::to_string(&espectro).unwrap();
            assert_eq!(json.trim_matches('"'), espectro.to_string());
        }
    }
}
