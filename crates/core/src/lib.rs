//! IndieReel domain core.
//!
//! Entity types, the client-side refiner, the rating aggregate, the
//! display-name index, the TTL cache and access checks. Nothing in this crate
//! performs I/O, so the store and HTTP layers can share it freely.

pub mod access;
pub mod cache;
pub mod entities;
pub mod entity;
pub mod error;
pub mod naming;
pub mod rating;
pub mod refine;
pub mod search;
pub mod storage;
pub mod types;
