//! Filmmaker profiles.

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::{is_present, list_contains, opt_eq, push_opt, Entity};
use crate::types::{DocId, Timestamp};

/// A document in the `filmmakers` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filmmaker {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub user_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Entity for Filmmaker {
    const COLLECTION: &'static str = "filmmakers";
    const NAME: &'static str = "Filmmaker";
    const VISIBILITY_FIELD: Option<&'static str> = Some("isPublic");
    const FILTER_FIELDS: &'static [&'static str] = &["location", "specialties"];
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
        push_opt(&mut out, &self.company);
        push_opt(&mut out, &self.location);
        push_opt(&mut out, &self.bio);
        out
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "location" => opt_eq(&self.location, value),
            "specialties" => list_contains(&self.specialties, value),
            _ => false,
        }
    }
}

impl Owned for Filmmaker {
    fn owner_id(&self) -> Option<&str> {
        Some(self.user_id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilmmaker {
    pub name: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default = "super::default_visible")]
    pub is_public: bool,
}

impl CreateFilmmaker {
    pub fn into_filmmaker(self, user_id: &str) -> Filmmaker {
        Filmmaker {
            user_id: user_id.to_string(),
            name: Some(self.name),
            location: self.location,
            company: self.company,
            bio: self.bio,
            profile_image_url: self.profile_image_url,
            specialties: self.specialties,
            is_public: self.is_public,
            ..Filmmaker::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmmaker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}
