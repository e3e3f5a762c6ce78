//! Site services.

pub mod auth;
