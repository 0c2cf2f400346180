//! Author display-name resolution and disambiguation.
//!
//! A user's base label comes from the first usable source in:
//! actor profile name, filmmaker profile name, account display name,
//! email local part, truncated id. When several users share a label, each
//! gets a letter suffix by account age: the oldest is `A`, the next `B`,
//! and so on.
//!
//! # Examples
//!
//! ```
//! use indiereel_core::naming::{NameCandidate, NameIndex};
//!
//! let index = NameIndex::build([
//!     NameCandidate::new("u1", "Sam Lee", None),
//!     NameCandidate::new("u2", "Sam Lee", None),
//!     NameCandidate::new("u3", "Ira Gold", None),
//! ]);
//! assert_eq!(index.display_name("u1"), Some("Sam Lee A"));
//! assert_eq!(index.display_name("u2"), Some("Sam Lee B"));
//! assert_eq!(index.display_name("u3"), Some("Ira Gold"));
//! ```

use std::collections::HashMap;

use crate::types::{sort_millis, DocId, Timestamp};

/// Characters of the user id kept by the last-resort fallback.
pub const ID_FALLBACK_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Base labels
// ---------------------------------------------------------------------------

/// Candidate sources for a user's base label, highest priority first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelSources<'a> {
    pub actor_name: Option<&'a str>,
    pub filmmaker_name: Option<&'a str>,
    pub display_name: Option<&'a str>,
    pub email: Option<&'a str>,
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Local part of an email address, if non-empty.
pub fn email_local_part(email: &str) -> Option<&str> {
    let local = email.split('@').next()?.trim();
    (!local.is_empty()).then_some(local)
}

/// First [`ID_FALLBACK_LENGTH`] characters of a user id.
pub fn truncated_id(user_id: &str) -> String {
    user_id.chars().take(ID_FALLBACK_LENGTH).collect()
}

/// Resolve the undisambiguated label for `user_id`.
pub fn base_label(user_id: &str, sources: &LabelSources<'_>) -> String {
    non_blank(sources.actor_name)
        .or_else(|| non_blank(sources.filmmaker_name))
        .or_else(|| non_blank(sources.display_name))
        .or_else(|| non_blank(sources.email).and_then(email_local_part))
        .map(str::to_string)
        .unwrap_or_else(|| truncated_id(user_id))
}

/// Letter for a zero-based rank within a shared label: `0 -> 'A'`.
pub fn suffix_letter(rank: usize) -> char {
    u32::try_from(rank)
        .ok()
        .and_then(|r| r.checked_add(65))
        .and_then(char::from_u32)
        .unwrap_or('?')
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// One user's entry in the index build.
#[derive(Debug, Clone)]
pub struct NameCandidate {
    pub user_id: DocId,
    pub label: String,
    pub created_at: Option<Timestamp>,
}

impl NameCandidate {
    pub fn new(user_id: impl Into<DocId>, label: impl Into<String>, created_at: Option<Timestamp>) -> Self {
        Self {
            user_id: user_id.into(),
            label: label.into(),
            created_at,
        }
    }
}

/// `label -> [(user, createdAt)]` plus the rendered name for every user.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    groups: HashMap<String, Vec<(DocId, Option<Timestamp>)>>,
    rendered: HashMap<DocId, String>,
    suffixes: HashMap<DocId, char>,
}

impl NameIndex {
    /// Build the index from a full scan. Groups are ordered by `createdAt`
    /// ascending; equal or missing timestamps keep scan order.
    pub fn build(candidates: impl IntoIterator<Item = NameCandidate>) -> Self {
        let mut groups: HashMap<String, Vec<(DocId, Option<Timestamp>)>> = HashMap::new();
        for c in candidates {
            groups
                .entry(c.label)
                .or_default()
                .push((c.user_id, c.created_at));
        }

        let mut rendered = HashMap::new();
        let mut suffixes = HashMap::new();
        for (label, members) in groups.iter_mut() {
            members.sort_by_key(|(_, created)| sort_millis(created.as_ref()));

            if members.len() == 1 {
                rendered.insert(members[0].0.clone(), label.clone());
                continue;
            }
            for (rank, (user_id, _)) in members.iter().enumerate() {
                let letter = suffix_letter(rank);
                suffixes.insert(user_id.clone(), letter);
                rendered.insert(user_id.clone(), format!("{label} {letter}"));
            }
        }

        Self {
            groups,
            rendered,
            suffixes,
        }
    }

    /// Rendered name for a user in the index.
    pub fn display_name(&self, user_id: &str) -> Option<&str> {
        self.rendered.get(user_id).map(String::as_str)
    }

    /// Suffix assigned to a user, if their label is shared.
    pub fn suffix_for(&self, user_id: &str) -> Option<char> {
        self.suffixes.get(user_id).copied()
    }

    /// Members sharing `label`, oldest first.
    pub fn group(&self, label: &str) -> Option<&[(DocId, Option<Timestamp>)]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}
