//! Actor profiles (casting directory).

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::{is_present, list_contains, opt_eq, push_opt, Entity};
use crate::types::{DocId, Timestamp};

/// A document in the `actors` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub user_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Entity for Actor {
    const COLLECTION: &'static str = "actors";
    const NAME: &'static str = "Actor";
    const VISIBILITY_FIELD: Option<&'static str> = Some("isPublic");
    const FILTER_FIELDS: &'static [&'static str] = &["location", "skills", "ethnicity", "ageRange"];
    const SERVER_FILTER_FIELD: Option<&'static str> = Some("location");

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
        is_present(&self.name) && self.created_at.is_some()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, &self.name);
        push_opt(&mut out, &self.location);
        push_opt(&mut out, &self.bio);
        out.extend(self.skills.iter().map(String::as_str));
        out
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "location" => opt_eq(&self.location, value),
            "skills" => list_contains(&self.skills, value),
            "ethnicity" => opt_eq(&self.ethnicity, value),
            "ageRange" => opt_eq(&self.age_range, value),
            _ => false,
        }
    }
}

impl Owned for Actor {
    fn owner_id(&self) -> Option<&str> {
        Some(self.user_id.as_str())
    }
}

/// Form payload for creating an actor profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActor {
    pub name: String,
    pub location: Option<String>,
    pub ethnicity: Option<String>,
    pub age_range: Option<String>,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "super::default_visible")]
    pub is_public: bool,
}

impl CreateActor {
    /// Build the record to store for `user_id`.
    pub fn into_actor(self, user_id: &str) -> Actor {
        Actor {
            user_id: user_id.to_string(),
            name: Some(self.name),
            location: self.location,
            ethnicity: self.ethnicity,
            age_range: self.age_range,
            bio: self.bio,
            profile_image_url: self.profile_image_url,
            skills: self.skills,
            is_public: self.is_public,
            ..Actor::default()
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}
