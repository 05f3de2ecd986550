//! Genre classification from free-text subject tags

use crate::models::Genre;

/// Checked in this order for every subject
const GENRE_KEYWORDS: [(&str, Genre); 4] = [
    ("fiction", Genre::Fiction),
    ("drama", Genre::Drama),
    ("comedy", Genre::Comedy),
    ("humor", Genre::Humor),
];

/// The first subject containing a keyword decides; no match is `Other`.
pub fn classify_genre<S: AsRef<str>>(subjects: &[S]) -> Genre {
    subjects
        .iter()
        .find_map(|subject| {
            let subject = subject.as_ref().to_lowercase();
            GENRE_KEYWORDS
                .iter()
                .find(|(keyword, _)| subject.contains(keyword))
                .map(|(_, genre)| *genre)
        })
        .unwrap_or(Genre::Other)
}
