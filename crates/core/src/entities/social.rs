//! Follow edges between users and likes on posts.

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::Entity;
use crate::types::{DocId, Timestamp};

/// A document in the `follows` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub follower_id: DocId,
    #[serde(default)]
    pub followee_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Entity for Follow {
    const COLLECTION: &'static str = "follows";
    const NAME: &'static str = "Follow";
    const FILTER_FIELDS: &'static [&'static str] = &["followerId", "followeeId"];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "followerId" => self.follower_id == value,
            "followeeId" => self.followee_id == value,
            _ => false,
        }
    }
}

impl Owned for Follow {
    fn owner_id(&self) -> Option<&str> {
        Some(self.follower_id.as_str())
    }
}

/// A document in the `postLikes` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLike {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub post_id: DocId,
    #[serde(default)]
    pub user_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Entity for PostLike {
    const COLLECTION: &'static str = "postLikes";
    const NAME: &'static str = "PostLike";
    const FILTER_FIELDS: &'static [&'static str] = &["postId", "userId"];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "postId" => self.post_id == value,
            "userId" => self.user_id == value,
            _ => false,
        }
    }
}

impl Owned for PostLike {
    fn owner_id(&self) -> Option<&str> {
        Some(self.user_id.as_str())
    }
}
