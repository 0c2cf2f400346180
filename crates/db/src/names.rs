//! Cached display-name resolution.
//!
//! The resolver keeps one [`NameIndex`] built from a full scan of user
//! accounts and role profiles. The index is rebuilt wholesale when the cache
//! entry expires or is invalidated by a profile write.

use std::collections::HashMap;
use std::sync::Arc;

use indiereel_core::cache::{Clock, FixedTtl, InvalidationPolicy, SystemClock, TtlCache};
use indiereel_core::entities::actor::Actor;
use indiereel_core::entities::filmmaker::Filmmaker;
use indiereel_core::entities::user::UserProfile;
use indiereel_core::naming::{base_label, truncated_id, LabelSources, NameCandidate, NameIndex};
use tokio::sync::Mutex;

use crate::error::DbResult;
use crate::reader::EntityReader;
use crate::store::{DocumentStore, Predicate};

/// Default lifetime of the cached index, in seconds.
pub const NAME_CACHE_TTL_SECS: i64 = 600;

/// Role-profile names keyed by user id. First profile per user wins.
type RoleNames = HashMap<String, String>;

pub struct DisplayNameResolver {
    cache: Mutex<TtlCache<(), Arc<NameIndex>>>,
}

impl Default for DisplayNameResolver {
    fn default() -> Self {
        Self::new(chrono::Duration::seconds(NAME_CACHE_TTL_SECS))
    }
}

impl DisplayNameResolver {
    /// Fixed-TTL resolver on the wall clock.
    pub fn new(ttl: chrono::Duration) -> Self {
        Self::with_policy(FixedTtl::new(ttl), Arc::new(SystemClock))
    }

    pub fn with_policy(policy: impl InvalidationPolicy + 'static, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: Mutex::new(TtlCache::new(policy, clock)),
        }
    }

    /// The current index, rebuilding it if the cached one is stale.
    ///
    /// The lock is held across the rebuild so concurrent callers wait for
    /// one scan instead of each starting their own.
    pub async fn index(&self, store: &dyn DocumentStore) -> DbResult<Arc<NameIndex>> {
        let mut cache = self.cache.lock().await;
        if let Some(index) = cache.get(&()) {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(build_index(store).await?);
        tracing::debug!(users = index.len(), "Rebuilt display-name index");
        cache.insert((), Arc::clone(&index));
        Ok(index)
    }

    /// Disambiguated display name for `user_id`. Never fails: users missing
    /// from the index are resolved directly without a suffix, and the last
    /// resort is the truncated id.
    pub async fn display_name(&self, store: &dyn DocumentStore, user_id: &str) -> String {
        match self.index(store).await {
            Ok(index) => {
                if let Some(name) = index.display_name(user_id) {
                    return name.to_string();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Display-name index unavailable, resolving directly");
            }
        }
        resolve_uncached(store, user_id).await
    }

    /// Drop the cached index so the next lookup rebuilds it.
    pub async fn invalidate(&self) {
        self.cache.lock().await.invalidate_all();
    }
}

async fn role_names<T, F>(store: &dyn DocumentStore, predicates: &[Predicate], key: F) -> RoleNames
where
    T: indiereel_core::entity::Entity,
    F: Fn(&T) -> (&str, Option<&str>),
{
    match EntityReader::fetch::<T>(store, predicates).await {
        Ok(records) => {
            let mut names = RoleNames::new();
            for record in &records {
                let (user_id, name) = key(record);
                if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
                    names
                        .entry(user_id.to_string())
                        .or_insert_with(|| name.to_string());
                }
            }
            names
        }
        Err(e) => {
            tracing::warn!(collection = T::COLLECTION, error = %e, "Failed to load role profiles");
            RoleNames::new()
        }
    }
}

async fn actor_names(store: &dyn DocumentStore, predicates: &[Predicate]) -> RoleNames {
    role_names::<Actor, _>(store, predicates, |a| (a.user_id.as_str(), a.name.as_deref())).await
}

async fn filmmaker_names(store: &dyn DocumentStore, predicates: &[Predicate]) -> RoleNames {
    role_names::<Filmmaker, _>(store, predicates, |f| (f.user_id.as_str(), f.name.as_deref())).await
}

fn label_for(user: &UserProfile, actors: &RoleNames, filmmakers: &RoleNames) -> String {
    let sources = LabelSources {
        actor_name: actors.get(&user.id).map(String::as_str),
        filmmaker_name: filmmakers.get(&user.id).map(String::as_str),
        display_name: user.display_name.as_deref(),
        email: user.email.as_deref(),
    };
    base_label(&user.id, &sources)
}

async fn build_index(store: &dyn DocumentStore) -> DbResult<NameIndex> {
    let (users, actors, filmmakers) = futures::join!(
        EntityReader::fetch::<UserProfile>(store, &[]),
        actor_names(store, &[]),
        filmmaker_names(store, &[]),
    );
    let users = users?;

    Ok(NameIndex::build(users.iter().map(|user| {
        NameCandidate::new(
            user.id.clone(),
            label_for(user, &actors, &filmmakers),
            user.created_at,
        )
    })))
}

async fn resolve_uncached(store: &dyn DocumentStore, user_id: &str) -> String {
    let by_user = [Predicate::eq("userId", user_id)];
    let (user, actors, filmmakers) = futures::join!(
        EntityReader::find::<UserProfile>(store, user_id),
        actor_names(store, &by_user),
        filmmaker_names(store, &by_user),
    );

    match user {
        Ok(Some(user)) => label_for(&user, &actors, &filmmakers),
        Ok(None) => {
            let stub = UserProfile {
                id: user_id.to_string(),
                ..UserProfile::default()
            };
            label_for(&stub, &actors, &filmmakers)
        }
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Failed to load user for display name");
            truncated_id(user_id)
        }
    }
}
