//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;

use crate::domain::book::{Book, BookRepository, Genre, NewBook};
use crate::domain::{DomainError, DomainResult};

/// Book store that lives for the life of the process
pub struct InMemoryBookRepository {
    books: DashMap<i32, Book>,
    book_counter: AtomicI32,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            book_counter: AtomicI32::new(1),
        }
    }

    /// Store pre-filled with a handful of finished books.
    pub fn with_demo_books() -> Self {
        let storage = Self::new();
        let now = Utc::now();

        for new_book in demo_books() {
            let id = storage.next_id();
            storage.books.insert(id, new_book.into_book(id, now));
        }

        storage
    }

    fn next_id(&self) -> i32 {
        self.book_counter.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn demo_books() -> Vec<NewBook> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        NewBook {
            title: "The Left Hand of Darkness".to_string(),
            author: "Ursula K. Le Guin".to_string(),
            genre: Genre::ScienceFiction,
            date_completed: date(2024, 1, 14),
            rating: 5,
            notes: Some("Winter is a character of its own.".to_string()),
        },
        NewBook {
            title: "Beloved".to_string(),
            author: "Toni Morrison".to_string(),
            genre: Genre::Fiction,
            date_completed: date(2024, 2, 2),
            rating: 5,
            notes: None,
        },
        NewBook {
            title: "Thinking, Fast and Slow".to_string(),
            author: "Daniel Kahneman".to_string(),
            genre: Genre::NonFiction,
            date_completed: date(2024, 3, 21),
            rating: 4,
            notes: Some("System 1 vs System 2.".to_string()),
        },
        NewBook {
            title: "The Name of the Wind".to_string(),
            author: "Patrick Rothfuss".to_string(),
            genre: Genre::Fantasy,
            date_completed: date(2024, 4, 9),
            rating: 4,
            notes: None,
        },
        NewBook {
            title: "The Big Sleep".to_string(),
            author: "Raymond Chandler".to_string(),
            genre: Genre::Mystery,
            date_completed: date(2024, 5, 30),
            rating: 3,
            notes: None,
        },
    ]
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Book>> {
        Ok(self.books.get(&id).map(|b| b.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Book>> {
        Ok(self.books.iter().map(|e| e.value().clone()).collect())
    }

    async fn save(&self, book: NewBook) -> DomainResult<Book> {
        let id = self.next_id();
        let book = book.into_book(id, Utc::now());
        self.books.insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, book: Book) -> DomainResult<()> {
        match self.books.get_mut(&book.id) {
            Some(mut entry) => {
                *entry = book;
                Ok(())
            }
            None => Err(DomainError::book_not_found(book.id)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.books
            .remove(&id)
            .ok_or_else(|| DomainError::book_not_found(id))?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.books.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Author".to_string(),
            genre: Genre::Other,
            date_completed: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            rating: 3,
            notes: None,
        }
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let repo = InMemoryBookRepository::new();
        let a = repo.save(new_book("A")).await.unwrap();
        let b = repo.save(new_book("B")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryBookRepository::new();
        let a = repo.save(new_book("A")).await.unwrap();
        repo.delete(a.id).await.unwrap();
        let b = repo.save(new_book("B")).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn update_missing_book_fails() {
        let repo = InMemoryBookRepository::new();
        let ghost = new_book("Ghost").into_book(99, Utc::now());
        let err = repo.update(ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Book", .. }));
    }

    #[tokio::test]
    async fn delete_missing_book_fails() {
        let repo = InMemoryBookRepository::new();
        assert!(repo.delete(7).await.is_err());
    }

    #[tokio::test]
    async fn update_replaces_stored_book() {
        let repo = InMemoryBookRepository::new();
        let mut book = repo.save(new_book("Draft")).await.unwrap();
        book.title = "Final".to_string();
        repo.update(book).await.unwrap();
        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.title, "Final");
    }

    #[tokio::test]
    async fn demo_store_is_seeded() {
        let repo = InMemoryBookRepository::with_demo_books();
        assert_eq!(repo.count().await.unwrap(), 5);
        let next = repo.save(new_book("Next")).await.unwrap();
        assert_eq!(next.id, 6);
    }
}
