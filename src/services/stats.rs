//! Catalog statistics service

use serde::Serialize;
use std::sync::Arc;

use crate::{error::AppResult, models::InstanceStatus, repository::CatalogStore};

/// Home-page counts. Each count is independent of the others; a failure
/// of any one fails the whole aggregate rather than rendering partially.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn CatalogStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn catalog_stats(&self) -> AppResult<CatalogStats> {
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) =
            tokio::try_join!(
                self.store.count_books(),
                self.store.count_instances(),
                self.store.count_instances_with_status(InstanceStatus::Available),
                self.store.count_authors(),
                self.store.count_genres(),
            )?;
        Ok(CatalogStats {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repository::MockCatalogStore;

    #[tokio::test]
    async fn stats_aggregate_all_five_counts() {
        let mut store = MockCatalogStore::new();
        store.expect_count_books().returning(|| Ok(7));
        store.expect_count_instances().returning(|| Ok(12));
        store
            .expect_count_instances_with_status()
            .withf(|s| *s == InstanceStatus::Available)
            .returning(|_| Ok(4));
        store.expect_count_authors().returning(|| Ok(3));
        store.expect_count_genres().returning(|| Ok(5));

        let service = StatsService::new(Arc::new(store));
        let stats = service.catalog_stats().await.unwrap();
        assert_eq!(
            stats,
            CatalogStats {
                book_count: 7,
                book_instance_count: 12,
                book_instance_available_count: 4,
                author_count: 3,
                genre_count: 5,
            }
        );
    }

    #[tokio::test]
    async fn one_failed_count_fails_the_aggregate() {
        let mut store = MockCatalogStore::new();
        store.expect_count_books().returning(|| Ok(7));
        store.expect_count_instances().returning(|| {
            Err(AppError::Internal("count unavailable".to_string()))
        });
        store
            .expect_count_instances_with_status()
            .returning(|_| Ok(4));
        store.expect_count_authors().returning(|| Ok(3));
        store.expect_count_genres().returning(|| Ok(5));

        let service = StatsService::new(Arc::new(store));
        assert!(service.catalog_stats().await.is_err());
    }
}
