//! Catalog result records (Gutendex JSON shape)

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{BookCandidate, CreateAuthor};

use super::{classifier::classify_genre, translation::BilingualLookup};

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogAuthor {
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    pub download_count: i64,
    /// Only an integer is taken as a year; Gutendex usually sends a boolean here
    #[serde(default, rename = "copyright", deserialize_with = "year_from_copyright")]
    pub year: Option<i32>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub authors: Vec<CatalogAuthor>,
    #[serde(default)]
    pub languages: Vec<String>,
}

fn year_from_copyright<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_i64)
        .and_then(|year| i32::try_from(year).ok()))
}

impl CatalogRecord {
    /// Classify, keep the first author, and translate the title to the query language
    pub fn into_candidate(self, lookup: &BilingualLookup) -> BookCandidate {
        let genre = classify_genre(&self.subjects);
        let author = self.authors.into_iter().next().map(|a| CreateAuthor {
            name: a.name,
            birth_year: a.birth_year,
            death_year: a.death_year,
        });

        BookCandidate {
            title: lookup.title_to_query(&self.title),
            author,
            genre,
            download_count: self.download_count,
            year_written: self.year,
            languages: self.languages,
        }
    }
}

/// Decode each result on its own; malformed entries are logged and dropped.
pub fn decode_records(results: Vec<Value>) -> Vec<CatalogRecord> {
    results
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| match serde_json::from_value::<CatalogRecord>(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed catalog record #{}: {}", idx + 1, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use serde_json::json;

    #[test]
    fn test_decode_full_record() {
        let records = decode_records(vec![json!({
            "id": 1513,
            "title": "Romeo and Juliet",
            "authors": [
                { "name": "Shakespeare, William", "birth_year": 1564, "death_year": 1616 },
                { "name": "Someone Else", "birth_year": null, "death_year": null }
            ],
            "subjects": ["Tragedies (Drama)", "Vendetta -- Drama"],
            "languages": ["en"],
            "copyright": false,
            "download_count": 52000
        })]);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.year, None);
        assert_eq!(record.authors.len(), 2);

        let candidate = record.clone().into_candidate(&BilingualLookup::default());
        assert_eq!(candidate.title, "romeo y julieta");
        assert_eq!(candidate.genre, Genre::Drama);
        assert_eq!(candidate.download_count, 52000);
        let author = candidate.author.unwrap();
        assert_eq!(author.name, "Shakespeare, William");
        assert_eq!(author.birth_year, Some(1564));
    }

    #[test]
    fn test_integer_copyright_is_year() {
        let records = decode_records(vec![json!({
            "title": "Ulysses",
            "download_count": 10,
            "copyright": 1922
        })]);
        assert_eq!(records[0].year, Some(1922));
        assert!(records[0].authors.is_empty());

        let candidate = records[0].clone().into_candidate(&BilingualLookup::default());
        assert_eq!(candidate.author, None);
        assert_eq!(candidate.genre, Genre::Other);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let records = decode_records(vec![
            json!({ "title": "No downloads" }),
            json!("not an object"),
            json!({ "title": "Dracula", "download_count": 3 }),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Dracula");
    }
}
