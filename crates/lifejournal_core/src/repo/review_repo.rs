//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `reviews` table.
//! - Own the `created_at DESC` ordering used by every list query.
//!
//! # Invariants
//! - Write paths validate text before SQL mutations.
//! - Updates touch `title` and `content` only.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::review::{validate_text, Review, ReviewId, ReviewValidationError};
use crate::model::section::Section;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    section,
    created_at
FROM reviews";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for review persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewValidationError),
    Db(DbError),
    NotFound(ReviewId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "review not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted review data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing reviews.
///
/// Results are always ordered by `created_at DESC, id ASC`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewListQuery {
    pub section: Option<Section>,
    pub limit: Option<u32>,
}

/// Repository interface for review CRUD operations.
pub trait ReviewRepository {
    fn create_review(&self, review: &Review) -> RepoResult<ReviewId>;
    /// Replaces title and content; no other column changes.
    fn update_review_text(&self, id: ReviewId, title: &str, content: &str) -> RepoResult<()>;
    fn get_review(&self, id: ReviewId) -> RepoResult<Option<Review>>;
    fn list_reviews(&self, query: &ReviewListQuery) -> RepoResult<Vec<Review>>;
    fn delete_review(&self, id: ReviewId) -> RepoResult<()>;
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_review(&self, review: &Review) -> RepoResult<ReviewId> {
        review.validate()?;

        self.conn.execute(
            "INSERT INTO reviews (id, title, content, section, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                review.id.to_string(),
                review.title.as_str(),
                review.content.as_str(),
                review.section.slug(),
                review.created_at,
            ],
        )?;

        Ok(review.id)
    }

    fn update_review_text(&self, id: ReviewId, title: &str, content: &str) -> RepoResult<()> {
        validate_text(title, content)?;

        let changed = self.conn.execute(
            "UPDATE reviews SET title = ?1, content = ?2 WHERE id = ?3;",
            params![title, content, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_review(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_review_row(row)?));
        }

        Ok(None)
    }

    fn list_reviews(&self, query: &ReviewListQuery) -> RepoResult<Vec<Review>> {
        let mut sql = format!("{REVIEW_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(section) = query.section {
            sql.push_str(" AND section = ?");
            bind_values.push(Value::Text(section.slug().to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut reviews = Vec::new();

        while let Some(row) = rows.next()? {
            reviews.push(parse_review_row(row)?);
        }

        Ok(reviews)
    }

    fn delete_review(&self, id: ReviewId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<Review> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in reviews.id"))
    })?;

    let section_text: String = row.get("section")?;
    let section = Section::from_slug(&section_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid section `{section_text}` in reviews.section"
        ))
    })?;

    let review = Review {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        section,
        created_at: row.get("created_at")?,
    };
    review.validate()?;
    Ok(review)
}
