//! Integration tests for Unique CCTV.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the backend API, then the site
//! cargo run -p unique-cctv-site
//!
//! # Run integration tests against it
//! cargo test -p unique-cctv-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `site_auth` - Login, logout, and session lifecycle
//! - `site_guard` - Route guard redirects for protected pages
//!
//! Tests are `#[ignore]`d by default because they need a running site
//! (and its backend) plus seeded test accounts. The site URL and
//! credentials are configurable via environment:
//!
//! - `SITE_BASE_URL` (default `http://localhost:3000`)
//! - `TEST_USER_EMAIL` / `TEST_USER_PASSWORD`
//! - `TEST_ADMIN_EMAIL` / `TEST_ADMIN_PASSWORD`
