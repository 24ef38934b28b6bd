//! Entity store contract and backends.
//!
//! The catalog core talks to persistence only through [`CatalogStore`].
//! Lookups return `Option` so "record absent" is always a tagged outcome,
//! never confused with an empty attribute. Saves are upserts: concurrent
//! writes to the same id are last-write-wins at this layer.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, Genre, InstanceStatus},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Authors
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn save_author(&self, author: &Author) -> AppResult<()>;
    async fn delete_author(&self, id: Uuid) -> AppResult<()>;
    async fn count_authors(&self) -> AppResult<i64>;

    // Genres
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn save_genre(&self, genre: &Genre) -> AppResult<()>;
    async fn delete_genre(&self, id: Uuid) -> AppResult<()>;
    async fn count_genres(&self) -> AppResult<i64>;

    // Books
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn save_book(&self, book: &Book) -> AppResult<()>;
    async fn delete_book(&self, id: Uuid) -> AppResult<()>;
    async fn count_books(&self) -> AppResult<i64>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;

    // Book instances
    async fn list_instances(&self) -> AppResult<Vec<BookInstance>>;
    async fn get_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn save_instance(&self, instance: &BookInstance) -> AppResult<()>;
    async fn delete_instance(&self, id: Uuid) -> AppResult<()>;
    async fn count_instances(&self) -> AppResult<i64>;
    async fn count_instances_with_status(&self, status: InstanceStatus) -> AppResult<i64>;
    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
}
