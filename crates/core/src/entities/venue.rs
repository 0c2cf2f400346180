//! Shooting locations and screening venues.

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::{is_present, list_contains, opt_eq, push_opt, Entity};
use crate::types::{DocId, Timestamp};

/// A document in the `venues` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub owner_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Entity for Venue {
    const COLLECTION: &'static str = "venues";
    const NAME: &'static str = "Venue";
    const VISIBILITY_FIELD: Option<&'static str> = Some("isPublic");
    const FILTER_FIELDS: &'static [&'static str] = &["location", "amenities"];
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
        push_opt(&mut out, &self.address);
        push_opt(&mut out, &self.description);
        out
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "location" => opt_eq(&self.location, value),
            "amenities" => list_contains(&self.amenities, value),
            _ => false,
        }
    }
}

impl Owned for Venue {
    fn owner_id(&self) -> Option<&str> {
        Some(self.owner_id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenue {
    pub name: String,
    pub location: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default = "super::default_visible")]
    pub is_public: bool,
}

impl CreateVenue {
    pub fn into_venue(self, owner_id: &str) -> Venue {
        Venue {
            owner_id: owner_id.to_string(),
            name: Some(self.name),
            location: self.location,
            address: self.address,
            capacity: self.capacity,
            amenities: self.amenities,
            description: self.description,
            image_url: self.image_url,
            is_public: self.is_public,
            ..Venue::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVenue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}
