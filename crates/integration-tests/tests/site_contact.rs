//! Integration test for the public contact form.
//!
//! Requires a running backend API and the site
//! (cargo run -p unique-cctv-site).
//!
//! Run with: cargo test -p unique-cctv-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect::Policy};

fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running site"]
async fn test_contact_submission_accepts_optional_phone() {
    let client = client();
    let base_url = site_base_url();

    // With a phone number.
    let resp = client
        .post(format!("{base_url}/contact"))
        .form(&[
            ("name", "Test Visitor"),
            ("email", "visitor@example.com"),
            ("phone", "0400000000"),
            ("message", "Quote request with phone"),
        ])
        .send()
        .await
        .expect("Failed to post contact form");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Thanks for reaching out"));

    // And without one.
    let resp = client
        .post(format!("{base_url}/contact"))
        .form(&[
            ("name", "Test Visitor"),
            ("email", "visitor@example.com"),
            ("message", "Quote request without phone"),
        ])
        .send()
        .await
        .expect("Failed to post contact form");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Thanks for reaching out"));
}
