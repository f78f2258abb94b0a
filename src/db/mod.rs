pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;

use std::sync::Arc;

use async_trait::async_trait;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use thiserror::Error;

use crate::config::{DatabaseConfig, StoreBackend};
use models::{Video, VideoChanges};

pub use memory::MemoryVideoStore;
pub use postgres::PgVideoStore;

pub type DbPool = deadpool::managed::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("video {0} already exists")]
    Conflict(i32),

    #[error("connection pool error: {0}")]
    Pool(String),

    #[error(transparent)]
    Query(#[from] diesel::result::Error),
}

/// Storage handle shared by every request.
///
/// Each method is a single read or write. `update` and `delete` report a
/// missing row through their return value, so callers never need a separate
/// existence check before mutating.
#[async_trait]
pub trait VideoStore: Send + Sync + 'static {
    /// Creates the backing table when it does not exist yet.
    async fn ensure_schema(&self) -> Result<()>;

    async fn find(&self, id: i32) -> Result<Option<Video>>;

    /// Inserts a new record. Returns `Err(Conflict)` if the id is taken.
    async fn insert(&self, video: Video) -> Result<Video>;

    /// Applies `changes` and returns the updated record, or `None` if no
    /// record has this id.
    async fn update(&self, id: i32, changes: VideoChanges) -> Result<Option<Video>>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}

pub fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);
    Pool::builder(manager)
        .max_size(config.max_connections as usize)
        .build()
        .map_err(|e| StoreError::Pool(e.to_string()))
}

/// Builds the configured store and makes sure its schema exists.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn VideoStore>> {
    let store: Arc<dyn VideoStore> = match config.backend {
        StoreBackend::Postgres => Arc::new(PgVideoStore::new(create_pool(config)?)),
        StoreBackend::Memory => Arc::new(MemoryVideoStore::default()),
    };
    store.ensure_schema().await?;
    Ok(store)
}
