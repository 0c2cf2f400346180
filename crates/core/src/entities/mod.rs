//! Stored record types and their write DTOs.
//!
//! Field names on the wire are camelCase. Optional fields are omitted from
//! serialized documents when absent, so writes never carry explicit nulls.

pub mod actor;
pub mod filmmaker;
pub mod message;
pub mod movie;
pub mod post;
pub mod rating;
pub mod request;
pub mod social;
pub mod user;
pub mod venue;

/// New profiles and listings are visible unless the form says otherwise.
pub(crate) fn default_visible() -> bool {
    true
}
