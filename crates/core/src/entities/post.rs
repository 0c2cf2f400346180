//! Community posts.

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::{is_present, list_contains, opt_eq, push_opt, Entity};
use crate::error::CoreError;
use crate::types::{DocId, Timestamp};

/// Maximum length of a post body in characters.
pub const MAX_POST_LENGTH: usize = 5000;

/// A document in the `posts` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub author_id: DocId,
    /// Author's display name at write time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<DocId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Entity for Post {
    const COLLECTION: &'static str = "posts";
    const NAME: &'static str = "Post";
    const VISIBILITY_FIELD: Option<&'static str> = Some("isPublic");
    const FILTER_FIELDS: &'static [&'static str] = &["category", "tags", "authorId", "movieId"];
    const SERVER_FILTER_FIELD: Option<&'static str> = Some("category");

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    fn is_visible(&self) -> bool {
        self.is_public
    }

    fn has_required_fields(&self) -> bool {
        is_present(&self.content)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, &self.content);
        push_opt(&mut out, &self.author_name);
        push_opt(&mut out, &self.category);
        out.extend(self.tags.iter().map(String::as_str));
        out
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "category" => opt_eq(&self.category, value),
            "tags" => list_contains(&self.tags, value),
            "authorId" => self.author_id == value,
            "movieId" => opt_eq(&self.movie_id, value),
            _ => false,
        }
    }
}

impl Owned for Post {
    fn owner_id(&self) -> Option<&str> {
        Some(self.author_id.as_str())
    }
}

/// Validate a post body.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Post content must not be empty".into()));
    }
    if content.chars().count() > MAX_POST_LENGTH {
        return Err(CoreError::Validation(format!(
            "Post content exceeds {MAX_POST_LENGTH} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub content: String,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub movie_id: Option<DocId>,
    pub image_url: Option<String>,
    #[serde(default = "super::default_visible")]
    pub is_public: bool,
}

impl CreatePost {
    pub fn into_post(self, author_id: &str, author_name: Option<String>) -> Post {
        Post {
            author_id: author_id.to_string(),
            author_name,
            content: Some(self.content),
            category: self.category,
            tags: self.tags,
            movie_id: self.movie_id,
            image_url: self.image_url,
            is_public: self.is_public,
            ..Post::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLikePatch {
    pub like_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_rejected() {
        assert!(validate_content("   ").is_err());
    }

    #[test]
    fn overlong_content_rejected() {
        let body = "x".repeat(MAX_POST_LENGTH + 1);
        assert!(validate_content(&body).is_err());
        assert!(validate_content(&body[..MAX_POST_LENGTH]).is_ok());
    }
}
