//! Unique CCTV Core - Shared types and the auth session model.
//!
//! This crate provides the pieces shared by the site binary and the
//! integration tests:
//!
//! - [`types`] - Newtype wrappers for IDs, emails, prices, and the closed
//!   role enum, plus the `UserProfile` value object
//! - [`credential`] - The persisted token/profile pair and its store
//! - [`session`] - The session state machine (restore, login, logout)
//! - [`guard`] - Route guard decisions for protected views
//! - [`policy`] - The route table and post-login redirect policy
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async. Every invariant of the auth subsystem lives here and
//! is unit-tested here; the site crate is a thin shell that applies these
//! decisions to real requests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod credential;
pub mod guard;
pub mod policy;
pub mod session;
pub mod types;

pub use credential::{
    Credential, CredentialError, CredentialStore, MemoryCredentialStore, RawCredential,
};
pub use guard::{Decision, Requirement};
pub use policy::{RoutePolicy, post_login_destination};
pub use session::{Session, SessionStatus};
pub use types::*;
