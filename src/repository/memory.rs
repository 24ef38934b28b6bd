//! In-memory catalog store.
//!
//! Same contract as the Postgres backend, kept in hash maps behind a
//! `tokio::sync::RwLock`. Used by the test suite and, with
//! `database.url = "memory"`, for running the server without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, Genre, InstanceStatus},
};

use super::CatalogStore;

#[derive(Default)]
pub struct MemoryCatalogStore {
    authors: RwLock<HashMap<Uuid, Author>>,
    genres: RwLock<HashMap<Uuid, Genre>>,
    books: RwLock<HashMap<Uuid, Book>>,
    instances: RwLock<HashMap<Uuid, BookInstance>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let mut rows: Vec<Author> = self.authors.read().await.values().cloned().collect();
        rows.sort_by(|a, b| {
            (a.family_name.as_str(), a.first_name.as_str())
                .cmp(&(b.family_name.as_str(), b.first_name.as_str()))
        });
        Ok(rows)
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.authors.read().await.get(&id).cloned())
    }

    async fn save_author(&self, author: &Author) -> AppResult<()> {
        self.authors.write().await.insert(author.id, author.clone());
        Ok(())
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<()> {
        self.authors.write().await.remove(&id);
        Ok(())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.authors.read().await.len() as i64)
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let mut rows: Vec<Genre> = self.genres.read().await.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.genres.read().await.get(&id).cloned())
    }

    async fn save_genre(&self, genre: &Genre) -> AppResult<()> {
        self.genres.write().await.insert(genre.id, genre.clone());
        Ok(())
    }

    async fn delete_genre(&self, id: Uuid) -> AppResult<()> {
        self.genres.write().await.remove(&id);
        Ok(())
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(self.genres.read().await.len() as i64)
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let mut rows: Vec<Book> = self.books.read().await.values().cloned().collect();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(rows)
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn save_book(&self, book: &Book) -> AppResult<()> {
        self.books.write().await.insert(book.id, book.clone());
        Ok(())
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.books.write().await.remove(&id);
        Ok(())
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.books.read().await.len() as i64)
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let mut rows: Vec<Book> = self
            .books
            .read()
            .await
            .values()
            .filter(|b| b.author == author_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(rows)
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let mut rows: Vec<Book> = self
            .books
            .read()
            .await
            .values()
            .filter(|b| b.genre.contains(&genre_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(rows)
    }

    async fn list_instances(&self) -> AppResult<Vec<BookInstance>> {
        let mut rows: Vec<BookInstance> =
            self.instances.read().await.values().cloned().collect();
        rows.sort_by(|a, b| a.imprint.cmp(&b.imprint));
        Ok(rows)
    }

    async fn get_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.instances.read().await.get(&id).cloned())
    }

    async fn save_instance(&self, instance: &BookInstance) -> AppResult<()> {
        self.instances
            .write()
            .await
            .insert(instance.id, instance.clone());
        Ok(())
    }

    async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        self.instances.write().await.remove(&id);
        Ok(())
    }

    async fn count_instances(&self) -> AppResult<i64> {
        Ok(self.instances.read().await.len() as i64)
    }

    async fn count_instances_with_status(&self, status: InstanceStatus) -> AppResult<i64> {
        Ok(self
            .instances
            .read()
            .await
            .values()
            .filter(|i| i.status == status)
            .count() as i64)
    }

    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let mut rows: Vec<BookInstance> = self
            .instances
            .read()
            .await
            .values()
            .filter(|i| i.book == book_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.imprint.cmp(&b.imprint));
        Ok(rows)
    }
}
