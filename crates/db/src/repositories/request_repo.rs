//! Repository for the `requests` collection.
//!
//! Requests are only ever visible to their two participants. A request the
//! caller is not part of is reported as not found.

use std::str::FromStr;

use indiereel_core::access::ensure_can_mutate;
use indiereel_core::entities::request::{CreateRequest, Request, RequestStatus, RequestStatusPatch};
use indiereel_core::entity::Entity;
use indiereel_core::error::CoreError;
use indiereel_core::refine::{ListQuery, Page};

use crate::error::DbResult;
use crate::names::DisplayNameResolver;
use crate::reader::EntityReader;
use crate::store::{DocumentStore, Predicate};

/// Which side of a request the caller is listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mailbox {
    /// Requests addressed to the caller.
    #[default]
    Inbox,
    /// Requests the caller sent.
    Outbox,
}

impl Mailbox {
    /// The participant field scoped to the caller.
    pub fn field(self) -> &'static str {
        match self {
            Self::Inbox => "toUserId",
            Self::Outbox => "fromUserId",
        }
    }
}

impl FromStr for Mailbox {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbox" => Ok(Self::Inbox),
            "outbox" => Ok(Self::Outbox),
            other => Err(CoreError::Validation(format!(
                "Invalid box '{other}'. Must be one of: inbox, outbox"
            ))),
        }
    }
}

pub struct RequestRepo;

impl RequestRepo {
    pub async fn list(
        store: &dyn DocumentStore,
        user_id: &str,
        mailbox: Mailbox,
        query: &ListQuery,
    ) -> DbResult<Page<Request>> {
        EntityReader::list_scoped(store, Predicate::eq(mailbox.field(), user_id), query).await
    }

    /// A request the caller participates in.
    pub async fn get(store: &dyn DocumentStore, user_id: &str, id: &str) -> DbResult<Request> {
        let request: Request = EntityReader::find_required(store, id).await?;
        if !request.is_participant(user_id) {
            return Err(CoreError::NotFound {
                entity: Request::NAME,
                id: id.to_string(),
            }
            .into());
        }
        Ok(request)
    }

    /// Send a request. Both participants' display names are resolved
    /// concurrently and copied onto the request.
    pub async fn create(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        input: CreateRequest,
    ) -> DbResult<Request> {
        input.validate(user_id)?;

        let (from_name, to_name) = futures::join!(
            names.display_name(store, user_id),
            names.display_name(store, &input.to_user_id),
        );
        let record = input.into_request(user_id, Some(from_name), Some(to_name));
        let request = EntityReader::create(store, &record).await?;
        Ok(request)
    }

    /// Accept, decline or withdraw a pending request.
    pub async fn set_status(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
        status: RequestStatus,
    ) -> DbResult<Request> {
        let existing = Self::get(store, user_id, id).await?;
        ensure_can_mutate(user_id, &existing)?;
        existing.check_transition(user_id, status)?;

        let request = EntityReader::patch(store, id, &RequestStatusPatch { status }).await?;
        Ok(request)
    }
}
