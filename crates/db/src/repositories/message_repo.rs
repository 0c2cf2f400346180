//! Repository for the `messages` collection.

use indiereel_core::entities::message::{ChatMessage, CreateMessage};
use indiereel_core::entities::request::RequestStatus;
use indiereel_core::error::CoreError;
use indiereel_core::refine::{retain_listable, sort_oldest_first};

use super::RequestRepo;
use crate::error::DbResult;
use crate::names::DisplayNameResolver;
use crate::reader::EntityReader;
use crate::store::{DocumentStore, Predicate};

/// Chat threads attached to requests.
pub struct MessageRepo;

impl MessageRepo {
    /// The whole thread of a request, oldest first. Participants only.
    pub async fn list_thread(
        store: &dyn DocumentStore,
        user_id: &str,
        request_id: &str,
    ) -> DbResult<Vec<ChatMessage>> {
        RequestRepo::get(store, user_id, request_id).await?;

        let messages: Vec<ChatMessage> =
            EntityReader::fetch(store, &[Predicate::eq("requestId", request_id)]).await?;
        let mut messages = retain_listable(messages);
        sort_oldest_first(&mut messages);
        Ok(messages)
    }

    /// Post to the thread of an accepted request.
    pub async fn post(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        request_id: &str,
        input: CreateMessage,
    ) -> DbResult<ChatMessage> {
        input.validate()?;
        let request = RequestRepo::get(store, user_id, request_id).await?;
        if request.status != RequestStatus::Accepted {
            return Err(CoreError::Conflict(format!(
                "Messages can only be sent on accepted requests; this one is {}",
                request.status
            ))
            .into());
        }

        let record = ChatMessage {
            request_id: request_id.to_string(),
            sender_id: user_id.to_string(),
            sender_name: Some(names.display_name(store, user_id).await),
            body: Some(input.body),
            ..ChatMessage::default()
        };
        let message = EntityReader::create(store, &record).await?;
        Ok(message)
    }
}
