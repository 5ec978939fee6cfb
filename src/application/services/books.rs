//! Book service: CRUD and list queries over a [`BookRepository`]

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::book::{Book, BookChanges, BookQuery, BookRepository, Genre, NewBook, MAX_RATING, MIN_RATING};
use crate::domain::{DomainError, DomainResult};
use crate::shared::pagination::{PaginatedResult, PaginationParams};

pub struct BookService {
    repo: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_books(
        &self,
        query: &BookQuery,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Book>> {
        let all = self.repo.find_all().await?;
        Ok(PaginatedResult::from_slice(query.apply(all), pagination))
    }

    pub async fn get_book(&self, id: i32) -> DomainResult<Book> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::book_not_found(id))
    }

    pub async fn create_book(&self, new_book: NewBook) -> DomainResult<Book> {
        let new_book = NewBook {
            title: required("title", new_book.title)?,
            author: required("author", new_book.author)?,
            rating: check_rating(new_book.rating)?,
            notes: new_book.notes.filter(|n| !n.trim().is_empty()),
            ..new_book
        };

        let book = self.repo.save(new_book).await?;
        metrics::counter!("books_created_total").increment(1);
        info!(book_id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    pub async fn update_book(&self, id: i32, changes: BookChanges) -> DomainResult<Book> {
        let changes = BookChanges {
            title: changes.title.map(|t| required("title", t)).transpose()?,
            author: changes.author.map(|a| required("author", a)).transpose()?,
            rating: changes.rating.map(check_rating).transpose()?,
            ..changes
        };

        let mut book = self.get_book(id).await?;
        book.apply(changes, Utc::now());
        self.repo.update(book.clone()).await?;

        info!(book_id = id, title = %book.title, "Book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: i32) -> DomainResult<()> {
        self.repo.delete(id).await?;
        metrics::counter!("books_deleted_total").increment(1);
        info!(book_id = id, "Book deleted");
        Ok(())
    }

    pub async fn count_books(&self) -> DomainResult<u64> {
        self.repo.count().await
    }

    pub fn list_genres(&self) -> &'static [Genre] {
        &Genre::ALL
    }
}

fn required(field: &str, value: String) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn check_rating(rating: u8) -> DomainResult<u8> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::Validation(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(rating)
}
