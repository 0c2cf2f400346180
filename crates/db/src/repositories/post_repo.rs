//! Repository for the `posts` collection.

use indiereel_core::access::ensure_can_mutate;
use indiereel_core::entities::post::{validate_content, CreatePost, Post, UpdatePost};
use indiereel_core::refine::{ListQuery, Page};

use crate::error::DbResult;
use crate::names::DisplayNameResolver;
use crate::reader::EntityReader;
use crate::store::DocumentStore;

pub struct PostRepo;

impl PostRepo {
    /// One page of the public feed.
    pub async fn list(store: &dyn DocumentStore, query: &ListQuery) -> DbResult<Page<Post>> {
        EntityReader::list(store, query).await
    }

    pub async fn get(store: &dyn DocumentStore, id: &str, viewer: &str) -> DbResult<Post> {
        EntityReader::find_viewable(store, id, viewer).await
    }

    /// Publish a post. The author's display name is copied onto the post.
    pub async fn create(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        input: CreatePost,
    ) -> DbResult<Post> {
        validate_content(&input.content)?;

        let author_name = names.display_name(store, user_id).await;
        let post = EntityReader::create(store, &input.into_post(user_id, Some(author_name))).await?;
        Ok(post)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
        input: &UpdatePost,
    ) -> DbResult<Post> {
        let existing: Post = EntityReader::find_viewable(store, id, user_id).await?;
        ensure_can_mutate(user_id, &existing)?;
        if let Some(content) = input.content.as_deref() {
            validate_content(content)?;
        }

        let post = EntityReader::patch(store, id, input).await?;
        Ok(post)
    }
}
