mod common;

use actix_web::test;
use serde_json::json;

use trip_synth_api::services::trip_generation_service::GenerationConfig;

use common::TestApp;

#[actix_rt::test]
async fn test_health_check() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["reference_offset_hours"], 8);
    assert!(body["version"].is_string());
}

#[actix_rt::test]
async fn test_generate_trip() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/generate")
        .set_json(&json!({
            "destination_city": "Tokyo",
            "destination_country_code": "JP",
            "trip_length_days": 3,
            "locale": "en",
            "seed": 7
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["descriptor"]["destination_city"], "Tokyo");
    assert_eq!(body["currency"], "JPY");
    assert_eq!(body["days"].as_object().unwrap().len(), 3);
    assert_eq!(body["packing_list"].as_array().unwrap().len(), 18);
    assert_eq!(body["budget"]["lines"].as_array().unwrap().len(), 4);

    let first_day = body["days"].as_object().unwrap().values().next().unwrap();
    assert_eq!(first_day["items"][0]["detail"]["kind"], "flight");
}

#[actix_rt::test]
async fn test_generate_trip_is_reproducible_with_seed() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let payload = json!({
        "destination_city": "Paris",
        "destination_country_code": "FR",
        "trip_length_days": 4,
        "locale": "zh",
        "seed": 99
    });

    let first = test::call_and_read_body(
        &app,
        test::TestRequest::post().uri("/api/trips/generate").set_json(&payload).to_request(),
    )
    .await;
    let second = test::call_and_read_body(
        &app,
        test::TestRequest::post().uri("/api/trips/generate").set_json(&payload).to_request(),
    )
    .await;

    assert_eq!(first, second);
}

#[actix_rt::test]
async fn test_generate_rejects_zero_length() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/generate")
        .set_json(&json!({
            "destination_city": "Tokyo",
            "destination_country_code": "JP",
            "trip_length_days": 0
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("trip_length_days"));
}

#[actix_rt::test]
async fn test_generate_rejects_length_over_configured_max() {
    let mut config = GenerationConfig::default();
    config.max_trip_length_days = 5;
    let test_app = TestApp::with_config(config);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/generate")
        .set_json(&json!({
            "destination_city": "Seoul",
            "destination_country_code": "KR",
            "trip_length_days": 6
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_generate_rejects_empty_city() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/generate")
        .set_json(&json!({
            "destination_city": "  ",
            "destination_country_code": "JP",
            "trip_length_days": 3
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_generate_missing_fields() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/generate")
        .set_json(&json!({
            "destination_city": "Tokyo"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_feed_honours_count() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/feed?count=3&start_offset=2&seed=5")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let trips = body.as_array().unwrap();
    assert_eq!(trips.len(), 3);
    assert_eq!(trips[0]["descriptor"]["destination_city"], "Bangkok");
}

#[actix_rt::test]
async fn test_feed_rejects_oversized_page() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/trips/feed?count=51").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_feed_rejects_offset_past_limit() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/feed?count=2&start_offset=18446744073709551615")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("start_offset"));
}

#[actix_rt::test]
async fn test_generate_reports_city_country() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/generate")
        .set_json(&json!({
            "destination_city": "London",
            "destination_country_code": "AU",
            "trip_length_days": 3,
            "seed": 4
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["descriptor"]["destination_country_code"], "GB");
    assert_eq!(body["currency"], "GBP");
}
