//! Favorite orders, loyalty balance and promotions against a mock backend.

use rust_decimal::Decimal;
use serde_json::json;
use teezy_client::{AUTH_HEADER, FavoriteOutcome, SessionError};
use teezy_core::{MenuItemId, UNKNOWN_ITEM_NAME};
use teezy_integration_tests::{RecordingHost, TestBackend};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_favorite(backend: &TestBackend, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/loyalty/favorite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&backend.server)
        .await;
}

// =============================================================================
// Favorite Order
// =============================================================================

#[tokio::test]
async fn test_load_favorite_fetches_menu_when_needed() {
    let backend = TestBackend::start().await;
    mount_favorite(
        &backend,
        json!({
            "order_details": [
                {"menu_item_id": 1, "quantity": 1},
                {"menu_item_id": 99, "quantity": 2},
                {"menu_item_id": 1, "quantity": 1}
            ],
            "name": "Weekend"
        }),
    )
    .await;

    let mut session = backend.session();
    let outcome = session.load_favorite().await.unwrap();

    assert_eq!(outcome, FavoriteOutcome::Loaded { lines: 2, missing: 1 });
    assert!(session.catalog_cache().is_loaded());

    let oolong = session.cart().line(MenuItemId::new(1)).unwrap();
    assert_eq!(oolong.quantity, 2);
    assert_eq!(oolong.name, "Da Hong Pao");

    let gone = session.cart().line(MenuItemId::new(99)).unwrap();
    assert_eq!(gone.name, UNKNOWN_ITEM_NAME);
    assert_eq!(gone.price, Decimal::ZERO);
    assert_eq!(session.total(), Decimal::new(640, 0));

    assert_eq!(backend.session().cart(), session.cart());
    assert!(backend.host.questions().is_empty());
}

#[tokio::test]
async fn test_load_favorite_asks_before_replacing() {
    let backend = TestBackend::start().await;
    mount_favorite(
        &backend,
        json!({"order_details": [{"menu_item_id": 2, "quantity": 4}], "name": null}),
    )
    .await;

    let mut session = backend.session();
    session.refresh_catalog().await.unwrap();
    session.add_item(MenuItemId::new(3)).unwrap();

    backend.host.answer_confirmations(false);
    assert_eq!(
        session.load_favorite().await.unwrap(),
        FavoriteOutcome::Declined
    );
    assert!(session.cart().line(MenuItemId::new(3)).is_some());

    backend.host.answer_confirmations(true);
    session.load_favorite().await.unwrap();
    assert!(session.cart().line(MenuItemId::new(3)).is_none());
    assert_eq!(session.cart().item_count(), 4);

    assert_eq!(backend.host.questions().len(), 2);
}

#[tokio::test]
async fn test_load_favorite_drops_bad_lines_only() {
    let backend = TestBackend::start().await;
    mount_favorite(
        &backend,
        json!({
            "order_details": [
                {"menu_item_id": 2, "quantity": 2},
                {"menu_item_id": 3, "quantity": -1},
                {"menu_item_id": "3", "qty": 1}
            ],
            "name": null
        }),
    )
    .await;

    let mut session = backend.session();
    let outcome = session.load_favorite().await.unwrap();

    assert_eq!(outcome, FavoriteOutcome::Loaded { lines: 1, missing: 0 });
    assert_eq!(session.cart().len(), 1);
    let sencha = session.cart().line(MenuItemId::new(2)).unwrap();
    assert_eq!(sencha.quantity, 2);
    assert_eq!(sencha.name, "Sencha");
    assert_eq!(session.total(), Decimal::new(180, 0));
    assert_eq!(backend.session().cart(), session.cart());
}

#[tokio::test]
async fn test_load_favorite_when_none_saved() {
    let backend = TestBackend::start().await;
    mount_favorite(&backend, json!({"order_details": [], "name": null})).await;

    let mut session = backend.session();
    let err = session.load_favorite().await.unwrap_err();
    assert_eq!(err, SessionError::NoFavoriteOrder);
    assert!(backend.persisted_cart().is_none());
}

#[tokio::test]
async fn test_save_favorite() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/loyalty/favorite"))
        .and(body_json(json!({
            "items": [{"menu_item_id": 2, "quantity": 1}, {"menu_item_id": 3, "quantity": 1}],
            "name": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order_details": [{"menu_item_id": 2, "quantity": 1}, {"menu_item_id": 3, "quantity": 1}],
            "name": null
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut session = backend.session();
    session.refresh_catalog().await.unwrap();
    session.add_item(MenuItemId::new(2)).unwrap();
    session.add_item(MenuItemId::new(3)).unwrap();

    session.save_favorite(None).await.unwrap();
    assert_eq!(backend.host.alerts(), vec!["Favorite order saved".to_string()]);
}

// =============================================================================
// Loyalty and Promotions
// =============================================================================

#[tokio::test]
async fn test_refresh_loyalty() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/loyalty/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"points": 42})))
        .mount(&backend.server)
        .await;

    let mut session = backend.session();
    assert!(session.loyalty().is_none());
    assert_eq!(session.refresh_loyalty().await.unwrap().points, 42);
    assert_eq!(session.loyalty().unwrap().points, 42);
}

#[tokio::test]
async fn test_unauthenticated_session_surfaces_backend_message() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/loyalty/balance"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid init data"})),
        )
        .mount(&backend.server)
        .await;

    let host = RecordingHost::new(None);
    let mut session = teezy_client::ShopSession::from_config(&backend.config(), host);

    let err = session.refresh_loyalty().await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid init data");

    let requests = backend.server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| !r.headers.contains_key(AUTH_HEADER)));
}

#[tokio::test]
async fn test_promotions_and_discounts() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/promotions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Autumn blend", "description": "New seasonal tea",
             "image_url": null, "start_date": "2026-10-01", "end_date": "2026-11-30",
             "is_active": true}
        ])))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/promotions/discounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "code": "TEA10", "percentage": "10.00", "value": null, "is_active": true},
            {"id": 2, "code": "MINUS50", "percentage": null, "value": "50.00", "is_active": true}
        ])))
        .mount(&backend.server)
        .await;

    let (promotions, discounts) = backend.session().promotions().await.unwrap();

    assert_eq!(promotions[0].title, "Autumn blend");
    let labels: Vec<String> = discounts.iter().map(|d| d.label()).collect();
    assert_eq!(labels, vec!["10%".to_string(), "50 ₽".to_string()]);
}

#[tokio::test]
async fn test_promotions_fail_together() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/promotions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/promotions/discounts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    let err = backend.session().promotions().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500");
}
