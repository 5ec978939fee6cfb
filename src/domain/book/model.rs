//! Book domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Mystery,
    Thriller,
    Romance,
    Biography,
    History,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Poetry,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 12] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Thriller,
        Genre::Romance,
        Genre::Biography,
        Genre::History,
        Genre::SelfHelp,
        Genre::Poetry,
        Genre::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
            Self::ScienceFiction => "Science Fiction",
            Self::Fantasy => "Fantasy",
            Self::Mystery => "Mystery",
            Self::Thriller => "Thriller",
            Self::Romance => "Romance",
            Self::Biography => "Biography",
            Self::History => "History",
            Self::SelfHelp => "Self-Help",
            Self::Poetry => "Poetry",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Genre {
    type Err = String;

    /// Accepts the display label or a compact form (`"nonfiction"`, `"self_help"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Genre::ALL
            .into_iter()
            .find(|g| {
                g.label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
                    == normalized
            })
            .ok_or_else(|| format!("unknown genre: {}", s))
    }
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A finished book in the reader's list
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub date_completed: NaiveDate,
    /// Stars, 1 to 5
    pub rating: u8,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when adding a book. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub date_completed: NaiveDate,
    pub rating: u8,
    pub notes: Option<String>,
}

impl NewBook {
    pub fn into_book(self, id: i32, now: DateTime<Utc>) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            date_completed: self.date_completed,
            rating: self.rating,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<Genre>,
    pub date_completed: Option<NaiveDate>,
    pub rating: Option<u8>,
    pub notes: Option<String>,
}

impl Book {
    /// Applies `changes` and refreshes `updated_at`.
    ///
    /// An empty `notes` string clears the notes.
    pub fn apply(&mut self, changes: BookChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(genre) = changes.genre {
            self.genre = genre;
        }
        if let Some(date) = changes.date_completed {
            self.date_completed = date;
        }
        if let Some(rating) = changes.rating {
            self.rating = rating;
        }
        if let Some(notes) = changes.notes {
            self.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        }
        self.updated_at = now;
    }
}
