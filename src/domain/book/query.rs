//! Search, filter and sort for the book list

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::{Book, Genre};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Author,
    Genre,
    #[default]
    DateCompleted,
    Rating,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Criteria for listing books. The default lists everything, most recently
/// completed first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookQuery {
    /// Case-insensitive substring over title, author and genre.
    pub search: Option<String>,
    pub genre: Option<Genre>,
    pub min_rating: Option<u8>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl BookQuery {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(genre) = self.genre {
            if book.genre != genre {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if book.rating < min {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                book.title.to_lowercase().contains(&term)
                    || book.author.to_lowercase().contains(&term)
                    || book.genre.label().to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let ordering = match self.sort {
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
            SortField::Genre => a.genre.label().cmp(b.genre.label()),
            SortField::DateCompleted => a.date_completed.cmp(&b.date_completed),
            SortField::Rating => a.rating.cmp(&b.rating),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let ordering = match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        // ties always resolve by id so paging is stable
        ordering.then_with(|| a.id.cmp(&b.id))
    }

    /// Filters and orders `books`.
    pub fn apply(&self, books: Vec<Book>) -> Vec<Book> {
        let mut selected: Vec<Book> = books.into_iter().filter(|b| self.matches(b)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }
}
