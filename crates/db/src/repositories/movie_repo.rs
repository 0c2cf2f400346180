//! Repository for the `movies` collection.

use indiereel_core::access::ensure_can_mutate;
use indiereel_core::entities::filmmaker::Filmmaker;
use indiereel_core::entities::movie::{validate_status, CreateMovie, Movie, UpdateMovie};
use indiereel_core::rating::RatingSummary;
use indiereel_core::refine::{ListQuery, Page};
use serde::Serialize;

use super::{require_text, require_text_if_present, FilmmakerRepo, RatingRepo};
use crate::error::DbResult;
use crate::names::DisplayNameResolver;
use crate::reader::EntityReader;
use crate::store::DocumentStore;

/// A movie with its related reads. Related parts that failed to load are
/// `None`; the movie itself is always present.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    pub movie: Movie,
    pub filmmaker: Option<Filmmaker>,
    pub rating: Option<RatingSummary>,
}

pub struct MovieRepo;

impl MovieRepo {
    /// One page of published movies.
    pub async fn list(store: &dyn DocumentStore, query: &ListQuery) -> DbResult<Page<Movie>> {
        EntityReader::list(store, query).await
    }

    /// A published movie, or one of the viewer's own drafts.
    pub async fn get(store: &dyn DocumentStore, id: &str, viewer: &str) -> DbResult<Movie> {
        EntityReader::find_viewable(store, id, viewer).await
    }

    /// The movie plus its filmmaker profile and live rating summary. The
    /// two related reads run concurrently and fail independently.
    pub async fn detail(store: &dyn DocumentStore, id: &str, viewer: &str) -> DbResult<MovieDetail> {
        let movie = Self::get(store, id, viewer).await?;

        let (filmmaker, rating) = futures::join!(
            FilmmakerRepo::find_by_user(store, &movie.filmmaker_id),
            RatingRepo::summary_for_movie(store, id),
        );

        let filmmaker = filmmaker
            .map_err(|e| tracing::warn!(movie_id = %id, error = %e, "Failed to load filmmaker"))
            .ok()
            .flatten()
            .filter(|f| f.is_public || f.user_id == viewer);
        let rating = rating
            .map_err(|e| tracing::warn!(movie_id = %id, error = %e, "Failed to load rating summary"))
            .ok();

        Ok(MovieDetail {
            movie,
            filmmaker,
            rating,
        })
    }

    pub async fn create(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        input: CreateMovie,
    ) -> DbResult<Movie> {
        require_text("title", &input.title)?;
        if let Some(status) = input.status.as_deref() {
            validate_status(status)?;
        }

        let filmmaker_name = names.display_name(store, user_id).await;
        let movie = EntityReader::create(store, &input.into_movie(user_id, Some(filmmaker_name))).await?;
        Ok(movie)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
        input: &UpdateMovie,
    ) -> DbResult<Movie> {
        let existing: Movie = EntityReader::find_viewable(store, id, user_id).await?;
        ensure_can_mutate(user_id, &existing)?;
        require_text_if_present("title", input.title.as_deref())?;
        if let Some(status) = input.status.as_deref() {
            validate_status(status)?;
        }

        let movie = EntityReader::patch(store, id, input).await?;
        Ok(movie)
    }
}
