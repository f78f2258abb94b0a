use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{Video, VideoChanges};
use super::{Result, StoreError, VideoStore};

/// In-process store keyed by video id. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryVideoStore {
    videos: RwLock<BTreeMap<i32, Video>>,
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Option<Video>> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn insert(&self, video: Video) -> Result<Video> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(StoreError::Conflict(video.id));
        }
        videos.insert(video.id, video.clone());
        Ok(video)
    }

    async fn update(&self, id: i32, changes: VideoChanges) -> Result<Option<Video>> {
        let mut videos = self.videos.write().await;
        Ok(videos.get_mut(&id).map(|video| {
            changes.apply_to(video);
            video.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        Ok(self.videos.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: i32, name: &str) -> Video {
        Video {
            id,
            name: name.to_string(),
            views: 10,
            likes: 2,
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemoryVideoStore::default();
        store.insert(video(3, "clip")).await.unwrap();

        assert_eq!(store.find(3).await.unwrap(), Some(video(3, "clip")));
        assert_eq!(store.find(4).await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts_and_keeps_original() {
        let store = MemoryVideoStore::default();
        store.insert(video(1, "first")).await.unwrap();

        let err = store.insert(video(1, "second")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(1)));
        assert_eq!(store.find(1).await.unwrap().unwrap().name, "first");
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let store = MemoryVideoStore::default();
        let changes = VideoChanges {
            views: Some(1),
            ..Default::default()
        };
        assert_eq!(store.update(9, changes).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_applies_partial_changes() {
        let store = MemoryVideoStore::default();
        store.insert(video(1, "clip")).await.unwrap();

        let updated = store
            .update(
                1,
                VideoChanges {
                    name: Some("renamed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.views, 10);
        assert_eq!(store.find(1).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let store = MemoryVideoStore::default();
        store.insert(video(1, "clip")).await.unwrap();

        assert!(store.delete(1).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
        assert_eq!(store.find(1).await.unwrap(), None);
    }
}
