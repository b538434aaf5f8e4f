//! Integration tests for inventory and stock transactions.
//!
//! These tests require a running panel with a migrated database; see
//! `admin_auth.rs` for the setup. They create rows and do not clean up -
//! run against a disposable database.

use reqwest::StatusCode;

use sunstock_integration_tests::{authenticated_client, base_url};

#[tokio::test]
#[ignore = "Requires running panel and database"]
async fn test_create_item_appears_in_listing() {
    let client = authenticated_client().await;
    let base = base_url();
    let name = format!("Testni panel {}", std::process::id());

    let resp = client
        .post(format!("{base}/inventory"))
        .form(&[
            ("name", name.as_str()),
            ("category", "Solarni paneli"),
            ("project", ""),
            ("currentStock", "25"),
            ("minStock", "5"),
            ("maxStock", "100"),
            ("unitPrice", "35000"),
            ("supplier", "Solar Tech Solutions"),
        ])
        .send()
        .await
        .expect("Failed to create item");
    assert!(resp.status().is_redirection());

    let body = client
        .get(format!("{base}/inventory"))
        .send()
        .await
        .expect("Failed to list inventory")
        .text()
        .await
        .expect("body");
    assert!(body.contains(&name));
}

#[tokio::test]
#[ignore = "Requires running panel and database"]
async fn test_inventory_search_filters_listing() {
    let client = authenticated_client().await;
    let base = base_url();

    let resp = client
        .get(format!("{base}/inventory?q=definitely-no-such-item"))
        .send()
        .await
        .expect("Failed to search inventory");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Nema stavki u inventaru"));
}

#[tokio::test]
#[ignore = "Requires running panel and database"]
async fn test_clients_csv_export_has_header() {
    let client = authenticated_client().await;

    let resp = client
        .get(format!("{}/clients/export.csv", base_url()))
        .send()
        .await
        .expect("Failed to export CSV");

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/csv"));

    let body = resp.text().await.expect("body");
    let first_line = body.lines().next().unwrap_or_default();
    assert!(first_line.starts_with("Datum,Projekat,"));
}
