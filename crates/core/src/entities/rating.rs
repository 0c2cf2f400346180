//! Movie ratings and reviews.

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::{push_opt, Entity};
use crate::types::{DocId, Timestamp};

/// A document in the `movieRatings` collection.
///
/// Ratings are never hard-deleted; `deleted` marks a retracted rating and
/// readers exclude it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRating {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub movie_id: DocId,
    #[serde(default)]
    pub user_id: DocId,
    #[serde(default)]
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Entity for MovieRating {
    const COLLECTION: &'static str = "movieRatings";
    const NAME: &'static str = "Rating";
    const FILTER_FIELDS: &'static [&'static str] = &["movieId", "userId"];
    const SERVER_FILTER_FIELD: Option<&'static str> = Some("movieId");

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    fn is_visible(&self) -> bool {
        !self.deleted
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, &self.review);
        push_opt(&mut out, &self.user_name);
        push_opt(&mut out, &self.movie_title);
        out
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "movieId" => self.movie_id == value,
            "userId" => self.user_id == value,
            _ => false,
        }
    }
}

impl Owned for MovieRating {
    fn owner_id(&self) -> Option<&str> {
        Some(self.user_id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRating {
    pub rating: f64,
    pub review: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRating {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

/// Patch that soft-deletes a rating.
#[derive(Debug, Clone, Serialize)]
pub struct SoftDeletePatch {
    pub deleted: bool,
}

impl Default for SoftDeletePatch {
    fn default() -> Self {
        Self { deleted: true }
    }
}
