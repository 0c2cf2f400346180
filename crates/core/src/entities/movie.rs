//! Movie listings.
//!
//! Movies are gated by `isPublished` rather than `isPublic`, and carry a
//! denormalized copy of their rating summary and filmmaker name.

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::{is_present, opt_eq, push_opt, Entity};
use crate::error::CoreError;
use crate::types::{DocId, Timestamp};

/// Status reported for legacy movies written before `status` existed.
pub const DEFAULT_MOVIE_STATUS: &str = "production";

/// Recognised production statuses.
pub const VALID_MOVIE_STATUSES: &[&str] = &[
    "development",
    "pre-production",
    "production",
    "post-production",
    "released",
];

/// A document in the `movies` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    /// User id of the filmmaker that owns the listing.
    #[serde(default)]
    pub filmmaker_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filmmaker_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Movie {
    /// Production status, defaulted for legacy records.
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_MOVIE_STATUS)
    }
}

impl Entity for Movie {
    const COLLECTION: &'static str = "movies";
    const NAME: &'static str = "Movie";
    const VISIBILITY_FIELD: Option<&'static str> = Some("isPublished");
    const FILTER_FIELDS: &'static [&'static str] = &["genre", "status", "location", "filmmakerId"];
    const SERVER_FILTER_FIELD: Option<&'static str> = Some("genre");

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    fn is_visible(&self) -> bool {
        self.is_published
    }

    fn has_required_fields(&self) -> bool {
        is_present(&self.title)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, &self.title);
        push_opt(&mut out, &self.synopsis);
        push_opt(&mut out, &self.genre);
        push_opt(&mut out, &self.location);
        push_opt(&mut out, &self.filmmaker_name);
        out
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "genre" => opt_eq(&self.genre, value),
            "status" => self.status() == value,
            "location" => opt_eq(&self.location, value),
            "filmmakerId" => self.filmmaker_id == value,
            _ => false,
        }
    }
}

impl Owned for Movie {
    fn owner_id(&self) -> Option<&str> {
        Some(self.filmmaker_id.as_str())
    }
}

/// Validate a production status string.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_MOVIE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_MOVIE_STATUSES.join(", ")
        )))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovie {
    pub title: String,
    pub genre: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub release_year: Option<i32>,
    #[serde(default)]
    pub is_published: bool,
}

impl CreateMovie {
    /// Build the record to store. `filmmaker_name` is the owner's resolved
    /// display name at write time.
    pub fn into_movie(self, filmmaker_id: &str, filmmaker_name: Option<String>) -> Movie {
        Movie {
            filmmaker_id: filmmaker_id.to_string(),
            filmmaker_name,
            title: Some(self.title),
            genre: self.genre,
            status: self.status,
            location: self.location,
            synopsis: self.synopsis,
            poster_url: self.poster_url,
            release_year: self.release_year,
            is_published: self.is_published,
            ..Movie::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovie {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Denormalized rating fields written back onto a movie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRatingPatch {
    pub average_rating: f64,
    pub rating_count: u32,
}
