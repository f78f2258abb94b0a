use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored video record. This is also the exact response shape.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable, ToSchema,
)]
#[diesel(table_name = crate::db::schema::videos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Video {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "intro.mp4")]
    pub name: String,
    pub views: i32,
    pub likes: i32,
}

/// Fields required to create a video. The id comes from the path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewVideo {
    pub name: String,
    pub views: i32,
    pub likes: i32,
}

impl NewVideo {
    pub fn with_id(self, id: i32) -> Video {
        Video {
            id,
            name: self.name,
            views: self.views,
            likes: self.likes,
        }
    }
}

/// Partial update. `None` fields are skipped by diesel's changeset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, AsChangeset, ToSchema)]
#[diesel(table_name = crate::db::schema::videos)]
pub struct VideoChanges {
    pub name: Option<String>,
    pub views: Option<i32>,
    pub likes: Option<i32>,
}

impl VideoChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.views.is_none() && self.likes.is_none()
    }

    pub fn apply_to(self, video: &mut Video) {
        if let Some(name) = self.name {
            video.name = name;
        }
        if let Some(views) = self.views {
            video.views = views;
        }
        if let Some(likes) = self.likes {
            video.likes = likes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Video {
        Video {
            id: 1,
            name: "a".to_string(),
            views: 0,
            likes: 0,
        }
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut video = sample();
        VideoChanges {
            likes: Some(5),
            ..Default::default()
        }
        .apply_to(&mut video);

        assert_eq!(video.name, "a");
        assert_eq!(video.views, 0);
        assert_eq!(video.likes, 5);
    }

    #[test]
    fn empty_changes() {
        assert!(VideoChanges::default().is_empty());
        assert!(!VideoChanges {
            name: Some("b".into()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn serializes_exactly_four_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "a", "views": 0, "likes": 0})
        );
    }
}
