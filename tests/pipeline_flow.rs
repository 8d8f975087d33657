//! End-to-end tests for path rewriting and fixture responses.

use serde_json::Value;

mod common;

fn shop_module(config: &mut plinth::config::AppConfig) {
    config.module.name = "shop".to_string();
    config.module.version = "V2".to_string();
}

#[tokio::test]
async fn test_module_segments_are_stripped_anywhere() {
    let app = common::spawn_app(|_, config| shop_module(config)).await;
    let client = common::client();

    for path in [
        "/health-check",
        "/shop/V2/health-check",
        "/V2/shop/health-check",
        "/shop/health-check",
        "/V2/health-check",
    ] {
        let res = client.get(app.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 200, "path {path} should reach the route");
        assert_eq!(res.text().await.unwrap(), "OK");
    }
}

#[tokio::test]
async fn test_partial_segment_matches_are_not_stripped() {
    let app = common::spawn_app(|_, config| shop_module(config)).await;
    let client = common::client();

    // "shopping" merely contains the module name; it must not collapse
    // onto the health route.
    let res = client
        .get(app.url("/shopping/health-check"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_get_fixture_replays_file_contents() {
    let app = common::spawn_app(|_, config| {
        shop_module(config);
        config.fixtures.enabled = true;
    })
    .await;
    common::write_under(
        app.root.path(),
        "data/widgets.json",
        r#"{"items": [1, 2, 3]}"#,
    );
    let client = common::client();

    let res = client
        .get(app.url("/shop/V2/widgets"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"], serde_json::json!([1, 2, 3]));
}

#[tokio::test]
async fn test_post_returns_created_without_a_file() {
    let app = common::spawn_app(|_, config| {
        config.fixtures.enabled = true;
    })
    .await;
    let client = common::client();

    let res = client
        .post(app.url("/orders"))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_put_and_delete_return_no_content() {
    let app = common::spawn_app(|_, config| {
        config.fixtures.enabled = true;
    })
    .await;
    let client = common::client();

    let res = client.put(app.url("/orders")).send().await.unwrap();
    assert_eq!(res.status(), 204);

    let res = client.delete(app.url("/orders")).send().await.unwrap();
    assert_eq!(res.status(), 204);
}

#[tokio::test]
async fn test_head_requests_are_not_intercepted() {
    let app = common::spawn_app(|_, config| {
        config.fixtures.enabled = true;
    })
    .await;
    common::write_under(app.root.path(), "data/widgets.json", "{}");
    let client = common::client();

    // HEAD falls through the fixture stage; nothing else serves it.
    let res = client.head(app.url("/widgets")).send().await.unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_fixture_misses_fall_through() {
    let app = common::spawn_app(|_, config| {
        config.fixtures.enabled = true;
    })
    .await;
    let client = common::client();

    let res = client.get(app.url("/absent")).send().await.unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_malformed_fixture_files_fall_through() {
    let app = common::spawn_app(|_, config| {
        config.fixtures.enabled = true;
    })
    .await;
    common::write_under(app.root.path(), "data/broken.json", "{ not json");
    let client = common::client();

    let res = client.get(app.url("/broken")).send().await.unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_disabled_fixtures_never_answer() {
    let app = common::spawn_app(|_, _| {}).await;
    common::write_under(app.root.path(), "data/widgets.json", "{}");
    let client = common::client();

    let res = client.get(app.url("/widgets")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    let res = client.post(app.url("/orders")).send().await.unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_health_check_is_never_intercepted() {
    let app = common::spawn_app(|_, config| {
        config.fixtures.enabled = true;
    })
    .await;
    common::write_under(app.root.path(), "data/health-check.json", r#"{"fixture": true}"#);
    let client = common::client();

    let res = client.get(app.url("/health-check")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_asset_paths_are_never_intercepted() {
    let app = common::spawn_app(|_, config| {
        config.fixtures.enabled = true;
    })
    .await;
    // A fixture exists for the endpoint, but the real asset must win.
    common::write_under(app.root.path(), "data/app.css.json", r#"{"fixture": true}"#);
    common::write_under(app.root.path(), "public/app.css", "body { margin: 0 }");
    let client = common::client();

    let res = client.get(app.url("/views/app.css")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "body { margin: 0 }");
}
