//! CSV sink for the consolidated dataset.
//!
//! One header row of the record field names, one row per record, absent
//! values as empty cells. An empty dataset still gets its header row, so
//! downstream consumers always see the schema.

use crate::models::ArticleRecord;
use std::error::Error;
use tracing::{info, instrument};

/// Column names, in [`ArticleRecord`] field order.
const COLUMNS: [&str; 10] = [
    "url",
    "title",
    "subtitle",
    "date_published",
    "body",
    "author",
    "section",
    "tags",
    "medio",
    "espectro_politico",
];

/// Serialize records to CSV bytes.
pub fn to_csv(records: &[ArticleRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);

        if records.is_empty() {
            // Serde-derived headers only appear with at least one record.
            writer.write_record(COLUMNS)?;
        } else {
            for record in records {
                writer.serialize(record)?;
            }
        }
        writer.flush()?;
    }
    Ok(buf)
}

/// Write the consolidated dataset to `path`.
#[instrument(level = "info", skip(records), fields(path = %path))]
pub async fn write_consolidated(
    records: &[ArticleRecord],
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let bytes = to_csv(records)?;
    tokio::fs::write(path, bytes).await?;
    info!(count = records.len(), "Wrote consolidated CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Espectro, ParsedArticle};

    fn sample_record() -> ArticleRecord {
        ParsedArticle {
            url: "https://example.com/politica/nota".to_string(),
            title: Some("Titular".to_string()),
            subtitle: None,
            date_published: Some("2024-05-01T10:00:00-05:00".to_string()),
            body: Some("cuerpo plano".to_string()),
            author: Some("Ana".to_string()),
            section: "politica".to_string(),
            tags: Some("paz, congreso".to_string()),
        }
        .tagged("ElNuevoSiglo", Espectro::Derecha)
    }

    #[test]
    fn test_to_csv_header_and_row() {
        let bytes = to_csv(&[sample_record()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "url,title,subtitle,date_published,body,author,section,tags,medio,espectro_politico"
        );
        assert_eq!(
            lines.next().unwrap(),
            "https://example.com/politica/nota,Titular,,2024-05-01T10:00:00-05:00,\
             cuerpo plano,Ana,politica,\"paz, congreso\",ElNuevoSiglo,derecha"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_to_csv_empty_dataset_keeps_header() {
        let bytes = to_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.trim_end(),
            "url,title,subtitle,date_published,body,author,section,tags,medio,espectro_politico"
        );
    }

    #[test]
    fn test_to_csv_absent_values_are_empty_cells() {
        let record = ParsedArticle {
            url: "https://example.com/a".to_string(),
            section: "politica".to_string(),
            ..Default::default()
        }
        .tagged("LaFM", Espectro::Derecha);

        let bytes = to_csv(&[record]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "https://example.com/a,,,,,,politica,,LaFM,derecha");
    }

    #[tokio::test]
    async fn test_write_consolidated_roundtrip() {
        let dir = std::env::temp_dir().join("prensa_politica_csv_test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("noticias.csv");
        let path_str = path.to_str().unwrap();

        write_consolidated(&[sample_record()], path_str).await.unwrap();

        let written = tokio::fs::read_to_string(path_str).await.unwrap();
        assert!(written.starts_with("url,title,subtitle"));
        assert!(written.contains("ElNuevoSiglo"));
        tokio::fs::remove_file(path_str).await.unwrap();
    }
}
