use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use super::models::{Video, VideoChanges};
use super::schema::videos;
use super::{DbPool, Result, StoreError, VideoStore};

const CREATE_VIDEOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS videos (
    id INTEGER PRIMARY KEY,
    name VARCHAR NOT NULL,
    views INTEGER NOT NULL,
    likes INTEGER NOT NULL
)";

type PooledConnection = deadpool::managed::Object<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// PostgreSQL store. A pooled connection is held only for the duration of
/// one call.
#[derive(Clone)]
pub struct PgVideoStore {
    pool: DbPool,
}

impl PgVideoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<PooledConnection> {
        self.pool.get().await.map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            StoreError::Pool(e.to_string())
        })
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn ensure_schema(&self) -> Result<()> {
        let conn = &mut self.conn().await?;
        diesel::sql_query(CREATE_VIDEOS_TABLE).execute(conn).await?;
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Option<Video>> {
        let conn = &mut self.conn().await?;
        let video = videos::table
            .find(id)
            .select(Video::as_select())
            .first(conn)
            .await
            .optional()?;
        Ok(video)
    }

    async fn insert(&self, video: Video) -> Result<Video> {
        let conn = &mut self.conn().await?;
        let id = video.id;
        diesel::insert_into(videos::table)
            .values(&video)
            .returning(Video::as_returning())
            .get_result(conn)
            .await
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    StoreError::Conflict(id)
                }
                other => StoreError::Query(other),
            })
    }

    async fn update(&self, id: i32, changes: VideoChanges) -> Result<Option<Video>> {
        // diesel refuses an UPDATE with nothing to SET
        if changes.is_empty() {
            return self.find(id).await;
        }

        let conn = &mut self.conn().await?;
        let video = diesel::update(videos::table.find(id))
            .set(&changes)
            .returning(Video::as_returning())
            .get_result(conn)
            .await
            .optional()?;
        Ok(video)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let conn = &mut self.conn().await?;
        let removed = diesel::delete(videos::table.find(id))
            .execute(conn)
            .await?;
        Ok(removed > 0)
    }
}
