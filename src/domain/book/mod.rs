//! Book aggregate
//!
//! Contains the Book entity, list queries, and the repository interface.

pub mod model;
pub mod query;
pub mod repository;

pub use model::{Book, BookChanges, Genre, NewBook, MAX_RATING, MIN_RATING};
pub use query::{BookQuery, SortField, SortOrder};
pub use repository::BookRepository;
