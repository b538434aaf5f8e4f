//! Integration tests for Sunstock.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and run migrations
//! cargo run -p sunstock-cli -- migrate
//!
//! # Start the panel
//! cargo run -p sunstock-admin
//!
//! # Run integration tests (they are #[ignore]d by default)
//! cargo test -p sunstock-integration-tests -- --ignored
//! ```
//!
//! The tests drive the panel over HTTP with a cookie-holding client; they
//! need a running server (`SUNSTOCK_BASE_URL`, default
//! `http://localhost:3001`) and a login created via
//! `sunstock-cli admin create` whose credentials are passed through
//! `SUNSTOCK_TEST_EMAIL` / `SUNSTOCK_TEST_PASSWORD`.

/// Base URL for the panel (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SUNSTOCK_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_owned())
}

/// Test login credentials from the environment.
#[must_use]
pub fn test_credentials() -> (String, String) {
    let email =
        std::env::var("SUNSTOCK_TEST_EMAIL").unwrap_or_else(|_| "test@example.com".to_owned());
    let password =
        std::env::var("SUNSTOCK_TEST_PASSWORD").unwrap_or_else(|_| "test-password".to_owned());
    (email, password)
}

/// Build a cookie-holding client and log in.
///
/// # Panics
///
/// Panics if the client cannot be built or the login request fails.
pub async fn authenticated_client() -> reqwest::Client {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client");

    let (email, password) = test_credentials();
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to send login request");

    assert!(
        resp.status().is_redirection(),
        "login did not redirect: {}",
        resp.status()
    );

    client
}
