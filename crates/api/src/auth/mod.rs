//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Sign-in happens at the identity provider; this service only verifies the
//! tokens it is handed.

pub mod jwt;
