//! Data models for Ex Libris

pub mod author;
pub mod book;
pub mod enums;

// Re-export commonly used types
pub use author::{Author, CreateAuthor};
pub use book::{Book, BookCandidate, BookDetails, CreateBook, UpdateBook};
pub use enums::Genre;
