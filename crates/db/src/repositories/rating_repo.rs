//! Repository for the `movieRatings` collection.
//!
//! Every write recomputes the movie's rating summary from scratch and
//! stores it on the movie document. That write-back is a second,
//! independent store call: if it fails the rating write still stands and
//! the failure is only logged.

use indiereel_core::access::ensure_can_mutate;
use indiereel_core::entities::movie::{Movie, MovieRatingPatch};
use indiereel_core::entities::rating::{CreateRating, MovieRating, SoftDeletePatch, UpdateRating};
use indiereel_core::entity::Entity;
use indiereel_core::error::CoreError;
use indiereel_core::rating::{summarize, validate_rating, RatingSummary};
use indiereel_core::refine::{ListQuery, Page};

use crate::error::DbResult;
use crate::names::DisplayNameResolver;
use crate::reader::EntityReader;
use crate::store::{DocumentStore, Predicate};

/// Result of [`RatingRepo::rate`].
#[derive(Debug, Clone)]
pub struct RateOutcome {
    pub rating: MovieRating,
    /// `false` when an existing live rating by the same user was updated.
    pub created: bool,
}

pub struct RatingRepo;

impl RatingRepo {
    /// Live ratings for a movie, newest first.
    pub async fn list_for_movie(
        store: &dyn DocumentStore,
        movie_id: &str,
        query: &ListQuery,
    ) -> DbResult<Page<MovieRating>> {
        let query = query.clone().filter("movieId", movie_id);
        EntityReader::list(store, &query).await
    }

    async fn fetch_for_movie(store: &dyn DocumentStore, movie_id: &str) -> DbResult<Vec<MovieRating>> {
        EntityReader::fetch(store, &[Predicate::eq("movieId", movie_id)]).await
    }

    /// Average and count over a movie's live ratings.
    pub async fn summary_for_movie(
        store: &dyn DocumentStore,
        movie_id: &str,
    ) -> DbResult<RatingSummary> {
        let ratings = Self::fetch_for_movie(store, movie_id).await?;
        Ok(summarize(&ratings))
    }

    /// Rate a movie. A user has at most one live rating per movie; rating
    /// again replaces the previous value and review.
    pub async fn rate(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        movie_id: &str,
        input: CreateRating,
    ) -> DbResult<RateOutcome> {
        validate_rating(input.rating, input.review.as_deref())?;
        let movie: Movie = EntityReader::find_viewable(store, movie_id, user_id).await?;

        let existing = Self::fetch_for_movie(store, movie_id)
            .await?
            .into_iter()
            .find(|r| r.user_id == user_id && !r.deleted);

        let outcome = match existing {
            Some(current) => {
                let patch = UpdateRating {
                    rating: Some(input.rating),
                    review: input.review,
                };
                let rating: MovieRating = EntityReader::patch(store, &current.id, &patch).await?;
                RateOutcome {
                    rating,
                    created: false,
                }
            }
            None => {
                let record = MovieRating {
                    movie_id: movie_id.to_string(),
                    user_id: user_id.to_string(),
                    rating: input.rating,
                    review: input.review,
                    movie_title: movie.title.clone(),
                    user_name: Some(names.display_name(store, user_id).await),
                    ..MovieRating::default()
                };
                let rating = EntityReader::create(store, &record).await?;
                RateOutcome {
                    rating,
                    created: true,
                }
            }
        };

        Self::refresh_movie_aggregate(store, movie_id).await;
        Ok(outcome)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
        input: &UpdateRating,
    ) -> DbResult<MovieRating> {
        let existing = Self::find_live(store, id).await?;
        ensure_can_mutate(user_id, &existing)?;
        validate_rating(
            input.rating.unwrap_or(existing.rating),
            input.review.as_deref(),
        )?;

        let rating: MovieRating = EntityReader::patch(store, id, input).await?;
        Self::refresh_movie_aggregate(store, &rating.movie_id).await;
        Ok(rating)
    }

    /// Mark a rating deleted. The record stays in the collection but no
    /// longer counts toward the average or appears in lists.
    pub async fn soft_delete(store: &dyn DocumentStore, user_id: &str, id: &str) -> DbResult<()> {
        let existing = Self::find_live(store, id).await?;
        ensure_can_mutate(user_id, &existing)?;

        let _: MovieRating = EntityReader::patch(store, id, &SoftDeletePatch::default()).await?;
        Self::refresh_movie_aggregate(store, &existing.movie_id).await;
        Ok(())
    }

    async fn find_live(store: &dyn DocumentStore, id: &str) -> DbResult<MovieRating> {
        let rating: MovieRating = EntityReader::find_required(store, id).await?;
        if rating.deleted {
            return Err(CoreError::NotFound {
                entity: MovieRating::NAME,
                id: id.to_string(),
            }
            .into());
        }
        Ok(rating)
    }

    /// Recompute the summary and write it onto the movie. Returns the
    /// summary written, or `None` if either step failed.
    pub async fn refresh_movie_aggregate(
        store: &dyn DocumentStore,
        movie_id: &str,
    ) -> Option<RatingSummary> {
        let summary = match Self::summary_for_movie(store, movie_id).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "Failed to recompute rating summary");
                return None;
            }
        };

        let patch = MovieRatingPatch {
            average_rating: summary.average_rating,
            rating_count: summary.rating_count,
        };
        match EntityReader::patch::<Movie, _>(store, movie_id, &patch).await {
            Ok(_) => Some(summary),
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "Failed to write rating summary to movie");
                None
            }
        }
    }
}
