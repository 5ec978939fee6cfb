//! Book DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::book::{Book, BookChanges, Genre, NewBook, SortField, SortOrder};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub date_completed: NaiveDate,
    pub rating: u8,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookDto {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
            genre: b.genre,
            date_completed: b.date_completed,
            rating: b.rating,
            notes: b.notes,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "author is required"))]
    pub author: String,
    pub genre: Genre,
    pub date_completed: NaiveDate,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl From<CreateBookRequest> for NewBook {
    fn from(r: CreateBookRequest) -> Self {
        Self {
            title: r.title,
            author: r.author,
            genre: r.genre,
            date_completed: r.date_completed,
            rating: r.rating,
            notes: r.notes,
        }
    }
}

/// Partial update; absent fields are left unchanged and an empty
/// `notes` string clears the notes.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub author: Option<String>,
    pub genre: Option<Genre>,
    pub date_completed: Option<NaiveDate>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<u8>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl From<UpdateBookRequest> for BookChanges {
    fn from(r: UpdateBookRequest) -> Self {
        Self {
            title: r.title,
            author: r.author,
            genre: r.genre,
            date_completed: r.date_completed,
            rating: r.rating,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBooksParams {
    /// Substring matched against title, author and genre
    pub search: Option<String>,
    /// Genre label (`Science Fiction`) or compact form (`science_fiction`)
    pub genre: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub min_rating: Option<u8>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreDto {
    pub value: Genre,
    pub label: String,
}

impl From<Genre> for GenreDto {
    fn from(g: Genre) -> Self {
        Self {
            value: g,
            label: g.label().to_string(),
        }
    }
}
