//! Integration tests for the admin console flows.
//!
//! These tests require:
//! - A running backend API
//! - The site running (cargo run -p unique-cctv-site)
//! - Seeded test accounts (see crate docs for environment variables)
//!
//! Run with: cargo test -p unique-cctv-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect::Policy};

fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn user_credentials() -> (String, String) {
    (
        std::env::var("TEST_USER_EMAIL").unwrap_or_else(|_| "user@example.com".to_string()),
        std::env::var("TEST_USER_PASSWORD").unwrap_or_else(|_| "password123".to_string()),
    )
}

fn admin_credentials() -> (String, String) {
    (
        std::env::var("TEST_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string()),
        std::env::var("TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "password123".to_string()),
    )
}

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

async fn login(client: &Client, email: &str, password: &str) -> StatusCode {
    let base_url = site_base_url();
    client
        .post(format!("{base_url}/login"))
        .form(&[("email", email), ("password", password)])
        .send()
        .await
        .expect("Failed to post login form")
        .status()
}

// ============================================================================
// Admin Console Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running site and seeded test accounts"]
async fn test_admin_dashboard_renders() {
    let client = client();
    let (email, password) = admin_credentials();
    assert!(login(&client, &email, &password).await.is_redirection());

    let resp = client
        .get(format!("{}/admin", site_base_url()))
        .send()
        .await
        .expect("Failed to fetch dashboard");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running site and seeded test accounts"]
async fn test_admin_can_update_appointment_status() {
    let base_url = site_base_url();

    // A user books an appointment so the admin list is non-empty.
    let user = client();
    let (email, password) = user_credentials();
    assert!(login(&user, &email, &password).await.is_redirection());
    let booked = user
        .post(format!("{base_url}/book-appointment"))
        .form(&[
            ("name", "Test User"),
            ("email", email.as_str()),
            ("mob_no", "0400000000"),
            ("address", "1 Test St"),
            ("selected_service", "CCTV Installation"),
            ("appointment_date", "2026-09-15"),
            ("appointment_time", "10:00"),
            ("description", "status update flow"),
        ])
        .send()
        .await
        .expect("Failed to book appointment");
    assert!(
        booked.status().is_success() || booked.status().is_redirection(),
        "booking failed with {}",
        booked.status()
    );

    // The admin picks the first status form off the list page and posts
    // a new status through it.
    let admin = client();
    let (email, password) = admin_credentials();
    assert!(login(&admin, &email, &password).await.is_redirection());

    let list = admin
        .get(format!("{base_url}/admin/appointments"))
        .send()
        .await
        .expect("Failed to fetch appointment list");
    assert_eq!(list.status(), StatusCode::OK);
    let body = list.text().await.expect("Failed to read list body");

    let marker = "/admin/appointments/";
    let start = body.find(marker).expect("no appointment rows rendered");
    let rest = &body[start..];
    let end = rest.find('"').expect("unterminated form action");
    let action = &rest[..end];
    assert!(action.ends_with("/status"), "unexpected action {action}");

    let resp = admin
        .post(format!("{base_url}{action}"))
        .form(&[("status", "CONFIRMED")])
        .send()
        .await
        .expect("Failed to post status update");
    assert!(
        resp.status().is_redirection(),
        "status update should redirect back, got {}",
        resp.status()
    );

    let after = admin
        .get(format!("{base_url}/admin/appointments"))
        .send()
        .await
        .expect("Failed to re-fetch appointment list")
        .text()
        .await
        .expect("Failed to read list body");
    assert!(after.contains("CONFIRMED"));
}
