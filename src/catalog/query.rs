//! Outbound catalog query parameters

use super::translation::BilingualLookup;

/// One catalog request; exactly one filter is set per query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Free-text search over titles and author names
    Search(String),
    /// Subject / bookshelf filter
    Topic(String),
    /// Language-code filter (aggregate count)
    Language(String),
}

impl CatalogQuery {
    /// Query-string pairs for the HTTP request
    pub fn params(&self) -> [(&'static str, &str); 1] {
        match self {
            CatalogQuery::Search(text) => [("search", text.as_str())],
            CatalogQuery::Topic(topic) => [("topic", topic.as_str())],
            CatalogQuery::Language(code) => [("languages", code.as_str())],
        }
    }

    /// The translated text the query carries
    pub fn text(&self) -> &str {
        match self {
            CatalogQuery::Search(text) | CatalogQuery::Topic(text) | CatalogQuery::Language(text) => {
                text
            }
        }
    }
}

/// Builds catalog queries from user input; no I/O
#[derive(Debug, Clone, Copy)]
pub struct CatalogQueryBuilder<'a> {
    lookup: &'a BilingualLookup,
}

impl<'a> CatalogQueryBuilder<'a> {
    pub fn new(lookup: &'a BilingualLookup) -> Self {
        Self { lookup }
    }

    pub fn by_title(&self, text: &str) -> CatalogQuery {
        CatalogQuery::Search(self.lookup.title_to_catalog(&text.trim().to_lowercase()))
    }

    pub fn by_genre(&self, genre: &str) -> CatalogQuery {
        CatalogQuery::Topic(self.lookup.genre_to_catalog(genre.trim()))
    }

    pub fn by_language(&self, code: &str) -> CatalogQuery {
        CatalogQuery::Language(code.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_title_translates() {
        let lookup = BilingualLookup::default();
        let builder = CatalogQueryBuilder::new(&lookup);
        assert_eq!(
            builder.by_title("Romeo y Julieta"),
            CatalogQuery::Search("romeo and juliet".to_string())
        );
        assert_eq!(
            builder.by_title("  Moby Dick "),
            CatalogQuery::Search("moby dick".to_string())
        );
    }

    #[test]
    fn test_by_genre_and_language() {
        let lookup = BilingualLookup::default();
        let builder = CatalogQueryBuilder::new(&lookup);
        assert_eq!(builder.by_genre("Ficción"), CatalogQuery::Topic("Fiction".to_string()));
        assert_eq!(builder.by_language("ES"), CatalogQuery::Language("es".to_string()));
    }

    #[test]
    fn test_params() {
        assert_eq!(
            CatalogQuery::Search("dracula".into()).params(),
            [("search", "dracula")]
        );
        assert_eq!(CatalogQuery::Topic("Drama".into()).params(), [("topic", "Drama")]);
        assert_eq!(CatalogQuery::Language("fr".into()).params(), [("languages", "fr")]);
    }
}
