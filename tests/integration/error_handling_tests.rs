// HTTP failures and malformed payloads

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use table_booking_insights::error::{ApiErrorCode, AppError};
use table_booking_insights::services::analytics_service::AnalyticsService;
use table_booking_insights::services::api_client::{
    ApiClientConfig, HttpReservationsClient, ReservationsApi,
};

fn client_for(base_url: &str) -> HttpReservationsClient {
    HttpReservationsClient::try_new(&ApiClientConfig::new(base_url)).expect("http client")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn forbidden_analytics_maps_to_permission_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/analytics/restaurant/1/weekday");
            then.status(403);
        })
        .await;

    let service = AnalyticsService::new(Arc::new(client_for(&server.base_url())));
    let error = service
        .weekday_chart(1, None, false)
        .await
        .expect_err("forbidden");

    assert_eq!(error.api_code(), Some(ApiErrorCode::Forbidden));
    assert_eq!(error.api_status(), Some(403));
    assert_eq!(error.to_string(), "No tienes permisos para ver estos datos");
    assert!(error.correlation_id().is_some());
}

#[tokio::test]
async fn failed_loads_are_not_cached() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/analytics/restaurant/6/weekday");
            then.status(503);
        })
        .await;

    let service = AnalyticsService::new(Arc::new(client_for(&server.base_url())));
    let first = service.weekday_distribution(6, None, false).await;
    let second = service.weekday_distribution(6, None, false).await;

    assert!(matches!(
        first,
        Err(AppError::Api {
            code: ApiErrorCode::ServerError,
            ..
        })
    ));
    assert!(second.is_err());
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn missing_restaurant_maps_to_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/restaurants/404/availability");
            then.status(404);
        })
        .await;

    let client = client_for(&server.base_url());
    let error = client
        .availability(404, date(2025, 3, 15))
        .await
        .expect_err("not found");
    assert_eq!(error.api_code(), Some(ApiErrorCode::NotFound));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn undecodable_body_is_an_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/restaurants/2/availability");
            then.status(200)
                .header("content-type", "application/json")
                .body("<html>oops</html>");
        })
        .await;

    let client = client_for(&server.base_url());
    let error = client
        .availability(2, date(2025, 3, 15))
        .await
        .expect_err("invalid body");
    assert_eq!(error.api_code(), Some(ApiErrorCode::InvalidResponse));
    assert_eq!(error.api_status(), Some(200));
}

#[tokio::test]
async fn wrong_availability_shape_is_an_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/restaurants/2/availability");
            then.status(200).json_body(json!({ "slots": "none" }));
        })
        .await;

    let client = client_for(&server.base_url());
    let error = client
        .availability(2, date(2025, 3, 15))
        .await
        .expect_err("invalid shape");
    assert_eq!(error.api_code(), Some(ApiErrorCode::InvalidResponse));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/restaurants/3/availability/week");
            then.status(200)
                .delay(StdDuration::from_secs(2))
                .json_body(json!([]));
        })
        .await;

    let config =
        ApiClientConfig::new(server.base_url()).with_timeout(StdDuration::from_millis(200));
    let client = HttpReservationsClient::try_new(&config).expect("http client");
    let error = client
        .week_availability(3, date(2025, 3, 10))
        .await
        .expect_err("timeout");
    assert_eq!(error.api_code(), Some(ApiErrorCode::Timeout));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let client = client_for("http://127.0.0.1:1");
    let error = client
        .weekday_distribution(1, None)
        .await
        .expect_err("connection refused");
    assert_eq!(error.api_code(), Some(ApiErrorCode::Network));
    assert!(error.api_status().is_none());
}
