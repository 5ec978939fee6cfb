//! Book repository interface

use async_trait::async_trait;

use super::model::{Book, NewBook};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Book>>;
    async fn find_all(&self) -> DomainResult<Vec<Book>>;
    /// Stores a new book, assigning its id and timestamps.
    async fn save(&self, book: NewBook) -> DomainResult<Book>;
    async fn update(&self, book: Book) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
    async fn count(&self) -> DomainResult<u64>;
}
