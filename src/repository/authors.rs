//! Authors repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, CreateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Exact (case-sensitive) name match
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_year, death_year FROM authors WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_year, death_year FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    /// Insert a new author; a name already taken is a Conflict
    pub async fn insert(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, birth_year, death_year)
            VALUES ($1, $2, $3)
            RETURNING id, name, birth_year, death_year
            "#,
        )
        .bind(&author.name)
        .bind(author.birth_year)
        .bind(author.death_year)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_year, death_year FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
