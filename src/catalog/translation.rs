//! Fixed bilingual lookup between the query language (Spanish) and the
//! catalog language (English).
//!
//! Only the listed terms are translated; anything else passes through
//! unchanged. Matching is a case-insensitive substring test and the first
//! table entry that matches wins, so table order matters.

use crate::models::Genre;

/// (catalog language, query language)
pub type TermPair = (&'static str, &'static str);

pub const GENRE_TABLE: &[TermPair] = &[
    ("Fiction", "Ficción"),
    ("Drama", "Drama"),
    ("Comedy", "Comedia"),
    ("Humor", "Humor"),
    ("Other", "Otro"),
];

pub const TITLE_TABLE: &[TermPair] = &[
    ("pride and prejudice", "orgullo y prejuicio"),
    ("romeo and juliet", "romeo y julieta"),
    ("the scarlet letter", "la letra escarlata"),
];

/// Immutable translation tables, built once at startup and shared by reference
#[derive(Debug, Clone)]
pub struct BilingualLookup {
    genres: &'static [TermPair],
    titles: &'static [TermPair],
}

impl Default for BilingualLookup {
    fn default() -> Self {
        Self::new(GENRE_TABLE, TITLE_TABLE)
    }
}

impl BilingualLookup {
    pub fn new(genres: &'static [TermPair], titles: &'static [TermPair]) -> Self {
        Self { genres, titles }
    }

    /// Query-language title to catalog language
    pub fn title_to_catalog(&self, text: &str) -> String {
        to_catalog(self.titles, text)
    }

    /// Catalog-language title to query language
    pub fn title_to_query(&self, text: &str) -> String {
        to_query(self.titles, text)
    }

    pub fn genre_to_catalog(&self, text: &str) -> String {
        to_catalog(self.genres, text)
    }

    pub fn genre_to_query(&self, text: &str) -> String {
        to_query(self.genres, text)
    }

    /// Query-language label for a classified genre
    pub fn genre_label(&self, genre: Genre) -> &'static str {
        self.genres
            .iter()
            .find(|(catalog, _)| *catalog == genre.as_str())
            .map(|(_, query)| *query)
            .unwrap_or(genre.as_str())
    }
}

fn to_catalog(table: &[TermPair], text: &str) -> String {
    let haystack = text.to_lowercase();
    table
        .iter()
        .find(|(_, query)| haystack.contains(&query.to_lowercase()))
        .map(|(catalog, _)| catalog.to_string())
        .unwrap_or_else(|| text.to_string())
}

fn to_query(table: &[TermPair], text: &str) -> String {
    let haystack = text.to_lowercase();
    table
        .iter()
        .find(|(catalog, _)| haystack.contains(&catalog.to_lowercase()))
        .map(|(_, query)| query.to_string())
        .unwrap_or_else(|| text.to_string())
}
