//! Chat messages exchanged on an accepted request.

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::{is_present, push_opt, Entity};
use crate::error::CoreError;
use crate::types::{DocId, Timestamp};

/// Maximum length of a chat message in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// A document in the `messages` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub request_id: DocId,
    #[serde(default)]
    pub sender_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Entity for ChatMessage {
    const COLLECTION: &'static str = "messages";
    const NAME: &'static str = "Message";
    const FILTER_FIELDS: &'static [&'static str] = &["requestId"];
    const SERVER_FILTER_FIELD: Option<&'static str> = Some("requestId");

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    fn has_required_fields(&self) -> bool {
        is_present(&self.body)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, &self.body);
        out
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        field == "requestId" && self.request_id == value
    }
}

impl Owned for ChatMessage {
    fn owner_id(&self) -> Option<&str> {
        Some(self.sender_id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub body: String,
}

impl CreateMessage {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.body.trim().is_empty() {
            return Err(CoreError::Validation("Message must not be empty".into()));
        }
        if self.body.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Message exceeds {MAX_MESSAGE_LENGTH} characters"
            )));
        }
        Ok(())
    }
}
