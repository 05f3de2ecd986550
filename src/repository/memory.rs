//! In-process store with the same uniqueness rules as the Postgres schema.
//! Ids are assigned in insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, CreateAuthor, CreateBook, UpdateBook},
};

use super::CatalogStore;

#[derive(Default)]
struct MemoryState {
    authors: Vec<Author>,
    books: Vec<Book>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn book_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book with id {} not found", id))
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn author_find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let state = self.state.read().await;
        Ok(state.authors.iter().find(|a| a.name == name).cloned())
    }

    async fn author_get(&self, id: i64) -> AppResult<Option<Author>> {
        let state = self.state.read().await;
        Ok(state.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn author_insert(&self, author: &CreateAuthor) -> AppResult<Author> {
        let mut state = self.state.write().await;
        if state.authors.iter().any(|a| a.name == author.name) {
            return Err(AppError::Conflict(format!(
                "Author '{}' already exists",
                author.name
            )));
        }

        let created = Author {
            id: state.authors.len() as i64 + 1,
            name: author.name.clone(),
            birth_year: author.birth_year,
            death_year: author.death_year,
        };
        state.authors.push(created.clone());
        Ok(created)
    }

    async fn authors_all(&self) -> AppResult<Vec<Author>> {
        Ok(self.state.read().await.authors.clone())
    }

    async fn book_find_by_title_and_author(
        &self,
        title: &str,
        author_id: Option<i64>,
    ) -> AppResult<Vec<Book>> {
        let state = self.state.read().await;
        Ok(state
            .books
            .iter()
            .filter(|b| b.title == title && b.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn book_insert(&self, book: &CreateBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        if state
            .books
            .iter()
            .any(|b| b.title == book.title && b.author_id == book.author_id)
        {
            return Err(AppError::Conflict(format!(
                "Book '{}' already exists for this author",
                book.title
            )));
        }

        let created = Book {
            id: state.books.len() as i64 + 1,
            title: book.title.clone(),
            author_id: book.author_id,
            genre: book.genre,
            download_count: book.download_count,
            year_written: book.year_written,
            languages: book.languages.clone(),
            search_count: 0,
        };
        state.books.push(created.clone());
        Ok(created)
    }

    async fn book_update(&self, id: i64, update: &UpdateBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        let book = state
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| book_not_found(id))?;

        book.genre = update.genre;
        book.download_count = update.download_count;
        book.year_written = update.year_written;
        book.languages = update.languages.clone();
        Ok(book.clone())
    }

    async fn book_increment_search_count(&self, id: i64) -> AppResult<Book> {
        let mut state = self.state.write().await;
        let book = state
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| book_not_found(id))?;

        book.search_count += 1;
        Ok(book.clone())
    }

    async fn books_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.state.read().await.books.clone())
    }

    async fn books_by_author(&self, author_id: i64) -> AppResult<Vec<Book>> {
        let state = self.state.read().await;
        Ok(state
            .books
            .iter()
            .filter(|b| b.author_id == Some(author_id))
            .cloned()
            .collect())
    }

    async fn books_top_by_search_count(&self, limit: i64) -> AppResult<Vec<Book>> {
        let mut books = self.state.read().await.books.clone();
        // stable sort keeps id order among equal counts
        books.sort_by(|a, b| b.search_count.cmp(&a.search_count));
        books.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use tokio_test::assert_err;

    fn create_book(title: &str, author_id: Option<i64>) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author_id,
            genre: Genre::Fiction,
            download_count: 1,
            year_written: None,
            languages: vec!["en".to_string()],
        }
    }

    #[tokio::test]
    async fn test_author_name_is_unique() {
        let store = MemoryStore::new();
        let author = CreateAuthor {
            name: "Hawthorne, Nathaniel".to_string(),
            birth_year: Some(1804),
            death_year: Some(1864),
        };
        store.author_insert(&author).await.unwrap();

        let err = assert_err!(store.author_insert(&author).await);
        assert!(err.is_conflict());
        assert_eq!(store.authors_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_book_natural_key() {
        let store = MemoryStore::new();
        store.book_insert(&create_book("Dracula", Some(1))).await.unwrap();
        store.book_insert(&create_book("Dracula", Some(2))).await.unwrap();
        store.book_insert(&create_book("Dracula", None)).await.unwrap();

        let err = assert_err!(store.book_insert(&create_book("Dracula", None)).await);
        assert!(err.is_conflict());

        let found = store
            .book_find_by_title_and_author("Dracula", None)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 3);
        assert_eq!(found[0].search_count, 0);
    }

    #[tokio::test]
    async fn test_top_by_search_count_ties_keep_id_order() {
        let store = MemoryStore::new();
        for title in ["A", "B", "C"] {
            store.book_insert(&create_book(title, None)).await.unwrap();
        }
        store.book_increment_search_count(3).await.unwrap();

        let top = store.books_top_by_search_count(3).await.unwrap();
        let ids: Vec<i64> = top.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        assert_eq!(store.books_top_by_search_count(1).await.unwrap().len(), 1);
        assert!(store.books_top_by_search_count(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_book() {
        let store = MemoryStore::new();
        let update = UpdateBook {
            genre: Genre::Other,
            download_count: 0,
            year_written: None,
            languages: vec![],
        };
        assert!(matches!(
            store.book_update(42, &update).await,
            Err(AppError::NotFound(_))
        ));
    }
}
