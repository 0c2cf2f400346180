//! Casting and collaboration requests between users.
//!
//! A request is scoped to its two participants rather than to a visibility
//! flag. Status moves only out of `pending`, and who may move it depends on
//! the target status.

use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::entity::{opt_eq, push_opt, Entity};
use crate::error::CoreError;
use crate::types::{DocId, Timestamp};

/// Maximum length of a request message in characters.
pub const MAX_REQUEST_MESSAGE_LENGTH: usize = 2000;

// ---------------------------------------------------------------------------
// RequestKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Casting,
    Collaboration,
    #[default]
    General,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casting => "casting",
            Self::Collaboration => "collaboration",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RequestStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Withdrawn,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A document in the `requests` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: DocId,
    #[serde(default)]
    pub from_user_id: DocId,
    #[serde(default)]
    pub to_user_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_name: Option<String>,
    #[serde(default)]
    pub kind: RequestKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<DocId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Request {
    pub fn is_participant(&self, user_id: &str) -> bool {
        !user_id.is_empty() && (self.from_user_id == user_id || self.to_user_id == user_id)
    }

    /// Check that `user_id` may move this request to `target`.
    ///
    /// - only `pending` requests change status;
    /// - the recipient accepts or declines;
    /// - the sender withdraws.
    pub fn check_transition(&self, user_id: &str, target: RequestStatus) -> Result<(), CoreError> {
        if self.status != RequestStatus::Pending {
            return Err(CoreError::Conflict(format!(
                "Request is already {}",
                self.status
            )));
        }

        let allowed = match target {
            RequestStatus::Accepted | RequestStatus::Declined => self.to_user_id == user_id,
            RequestStatus::Withdrawn => self.from_user_id == user_id,
            RequestStatus::Pending => {
                return Err(CoreError::Validation(
                    "A request cannot be moved back to pending".into(),
                ));
            }
        };

        if allowed {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "You cannot mark this request as {target}"
            )))
        }
    }
}

impl Entity for Request {
    const COLLECTION: &'static str = "requests";
    const NAME: &'static str = "Request";
    const FILTER_FIELDS: &'static [&'static str] = &["status", "kind", "movieId"];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, &self.message);
        push_opt(&mut out, &self.from_name);
        push_opt(&mut out, &self.to_name);
        out
    }

    fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "status" => self.status.as_str() == value,
            "kind" => self.kind.as_str() == value,
            "movieId" => opt_eq(&self.movie_id, value),
            _ => false,
        }
    }
}

impl Owned for Request {
    fn owner_id(&self) -> Option<&str> {
        Some(self.from_user_id.as_str())
    }

    fn can_mutate(&self, user_id: &str) -> bool {
        self.is_participant(user_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub to_user_id: DocId,
    #[serde(default)]
    pub kind: RequestKind,
    pub message: Option<String>,
    pub movie_id: Option<DocId>,
}

impl CreateRequest {
    pub fn validate(&self, from_user_id: &str) -> Result<(), CoreError> {
        if self.to_user_id.trim().is_empty() {
            return Err(CoreError::Validation("toUserId must not be empty".into()));
        }
        if self.to_user_id == from_user_id {
            return Err(CoreError::Validation(
                "You cannot send a request to yourself".into(),
            ));
        }
        if let Some(msg) = &self.message {
            if msg.chars().count() > MAX_REQUEST_MESSAGE_LENGTH {
                return Err(CoreError::Validation(format!(
                    "Message exceeds {MAX_REQUEST_MESSAGE_LENGTH} characters"
                )));
            }
        }
        Ok(())
    }

    pub fn into_request(
        self,
        from_user_id: &str,
        from_name: Option<String>,
        to_name: Option<String>,
    ) -> Request {
        Request {
            from_user_id: from_user_id.to_string(),
            to_user_id: self.to_user_id,
            from_name,
            to_name,
            kind: self.kind,
            message: self.message,
            movie_id: self.movie_id,
            ..Request::default()
        }
    }
}

/// Body of `PUT /requests/{id}/status`, also used as the stored patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestStatusPatch {
    pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn pending() -> Request {
        Request {
            id: "r1".into(),
            from_user_id: "alice".into(),
            to_user_id: "bob".into(),
            ..Request::default()
        }
    }

    #[test]
    fn recipient_accepts() {
        assert!(pending()
            .check_transition("bob", RequestStatus::Accepted)
            .is_ok());
    }

    #[test]
    fn sender_cannot_accept() {
        assert_matches!(
            pending().check_transition("alice", RequestStatus::Accepted),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn sender_withdraws_recipient_cannot() {
        assert!(pending()
            .check_transition("alice", RequestStatus::Withdrawn)
            .is_ok());
        assert_matches!(
            pending().check_transition("bob", RequestStatus::Withdrawn),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn settled_request_is_conflict() {
        let mut req = pending();
        req.status = RequestStatus::Declined;
        assert_matches!(
            req.check_transition("bob", RequestStatus::Accepted),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn outsider_cannot_mutate() {
        assert!(pending().can_mutate("bob"));
        assert!(!pending().can_mutate("carol"));
    }

    #[test]
    fn self_request_rejected() {
        let input = CreateRequest {
            to_user_id: "alice".into(),
            kind: RequestKind::Casting,
            message: None,
            movie_id: None,
        };
        assert_matches!(input.validate("alice"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn status_wire_format() {
        let json = serde_json::to_value(RequestStatusPatch {
            status: RequestStatus::Withdrawn,
        })
        .unwrap();
        assert_eq!(json["status"], "withdrawn");
    }
}
