//! # Request Handlers
//!
//! Endpoint implementations, called from thin wrappers in the router.

pub mod auth;
pub mod categories;
pub mod images;
pub mod tags;
pub mod users;
pub mod videos;
