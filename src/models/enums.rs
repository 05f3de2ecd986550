//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

/// Book genre, as classified from catalog subject tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Genre {
    Fiction,
    Drama,
    Comedy,
    Humor,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 5] = [
        Genre::Fiction,
        Genre::Drama,
        Genre::Comedy,
        Genre::Humor,
        Genre::Other,
    ];

    /// Catalog-language label, also the stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::Drama => "Drama",
            Genre::Comedy => "Comedy",
            Genre::Humor => "Humor",
            Genre::Other => "Other",
        }
    }
}

impl From<&str> for Genre {
    fn from(v: &str) -> Self {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(v.trim()))
            .unwrap_or(Genre::Other)
    }
}

impl From<String> for Genre {
    fn from(v: String) -> Self {
        Genre::from(v.as_str())
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
