//! Repositories for the `follows` and `postLikes` collections.
//!
//! Both are edge collections: one document per (user, target) pair. Creating
//! an edge that already exists, or removing one that does not, is a no-op.

use indiereel_core::access::ensure_can_mutate;
use indiereel_core::entities::post::{Post, PostLikePatch};
use indiereel_core::entities::social::{Follow, PostLike};
use indiereel_core::entity::Entity;
use indiereel_core::error::CoreError;
use indiereel_core::refine::sort_newest_first;
use serde::Serialize;

use crate::error::DbResult;
use crate::reader::EntityReader;
use crate::store::{DocumentStore, Predicate};

// ---------------------------------------------------------------------------
// Follows
// ---------------------------------------------------------------------------

pub struct FollowRepo;

impl FollowRepo {
    fn edge(follower_id: &str, followee_id: &str) -> [Predicate; 2] {
        [
            Predicate::eq("followerId", follower_id),
            Predicate::eq("followeeId", followee_id),
        ]
    }

    /// Follow `followee_id`. Returns the existing edge if already following.
    pub async fn follow(
        store: &dyn DocumentStore,
        follower_id: &str,
        followee_id: &str,
    ) -> DbResult<Follow> {
        if follower_id == followee_id {
            return Err(CoreError::Validation("You cannot follow yourself".into()).into());
        }

        let existing: Vec<Follow> =
            EntityReader::fetch(store, &Self::edge(follower_id, followee_id)).await?;
        if let Some(follow) = existing.into_iter().next() {
            return Ok(follow);
        }

        let record = Follow {
            follower_id: follower_id.to_string(),
            followee_id: followee_id.to_string(),
            ..Follow::default()
        };
        let follow = EntityReader::create(store, &record).await?;
        Ok(follow)
    }

    /// Stop following. Returns whether an edge was removed.
    pub async fn unfollow(
        store: &dyn DocumentStore,
        follower_id: &str,
        followee_id: &str,
    ) -> DbResult<bool> {
        let edges: Vec<Follow> =
            EntityReader::fetch(store, &Self::edge(follower_id, followee_id)).await?;

        let mut removed = false;
        for edge in &edges {
            ensure_can_mutate(follower_id, edge)?;
            removed |= store.delete(Follow::COLLECTION, &edge.id).await?;
        }
        Ok(removed)
    }

    /// Edges pointing at `user_id`, newest first.
    pub async fn followers(store: &dyn DocumentStore, user_id: &str) -> DbResult<Vec<Follow>> {
        let mut edges: Vec<Follow> =
            EntityReader::fetch(store, &[Predicate::eq("followeeId", user_id)]).await?;
        sort_newest_first(&mut edges);
        Ok(edges)
    }

    /// Edges from `user_id`, newest first.
    pub async fn following(store: &dyn DocumentStore, user_id: &str) -> DbResult<Vec<Follow>> {
        let mut edges: Vec<Follow> =
            EntityReader::fetch(store, &[Predicate::eq("followerId", user_id)]).await?;
        sort_newest_first(&mut edges);
        Ok(edges)
    }
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// The caller's like state on a post after a like or unlike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub liked: bool,
    pub like_count: u32,
}

pub struct LikeRepo;

impl LikeRepo {
    async fn edges(store: &dyn DocumentStore, user_id: &str, post_id: &str) -> DbResult<Vec<PostLike>> {
        EntityReader::fetch(
            store,
            &[
                Predicate::eq("postId", post_id),
                Predicate::eq("userId", user_id),
            ],
        )
        .await
    }

    pub async fn like(store: &dyn DocumentStore, user_id: &str, post_id: &str) -> DbResult<LikeState> {
        let post: Post = EntityReader::find_viewable(store, post_id, user_id).await?;

        if Self::edges(store, user_id, post_id).await?.is_empty() {
            let record = PostLike {
                post_id: post_id.to_string(),
                user_id: user_id.to_string(),
                ..PostLike::default()
            };
            let _: PostLike = EntityReader::create(store, &record).await?;
            tracing::info!(post_id, user_id, "Post liked");
        }

        let like_count = Self::refresh_like_count(store, post_id)
            .await
            .unwrap_or(post.like_count);
        Ok(LikeState {
            liked: true,
            like_count,
        })
    }

    pub async fn unlike(store: &dyn DocumentStore, user_id: &str, post_id: &str) -> DbResult<LikeState> {
        let post: Post = EntityReader::find_viewable(store, post_id, user_id).await?;

        let mut removed = false;
        for edge in Self::edges(store, user_id, post_id).await? {
            ensure_can_mutate(user_id, &edge)?;
            removed |= store.delete(PostLike::COLLECTION, &edge.id).await?;
        }
        if removed {
            tracing::info!(post_id, user_id, "Post unliked");
        }

        let like_count = Self::refresh_like_count(store, post_id)
            .await
            .unwrap_or(post.like_count);
        Ok(LikeState {
            liked: false,
            like_count,
        })
    }

    /// Recount likes and write the count onto the post. Returns `None` if
    /// either step failed.
    pub async fn refresh_like_count(store: &dyn DocumentStore, post_id: &str) -> Option<u32> {
        let likes = match EntityReader::fetch::<PostLike>(store, &[Predicate::eq("postId", post_id)]).await {
            Ok(likes) => likes,
            Err(e) => {
                tracing::warn!(post_id, error = %e, "Failed to count likes");
                return None;
            }
        };
        let like_count = u32::try_from(likes.len()).unwrap_or(u32::MAX);

        match EntityReader::patch::<Post, _>(store, post_id, &PostLikePatch { like_count }).await {
            Ok(_) => Some(like_count),
            Err(e) => {
                tracing::warn!(post_id, error = %e, "Failed to write like count to post");
                None
            }
        }
    }
}
