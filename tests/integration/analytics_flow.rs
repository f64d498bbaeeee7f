use std::sync::Arc;

use chrono::Duration;
use httpmock::prelude::*;
use serde_json::json;
use table_booking_insights::models::analytics::{DateRange, DayHighlight};
use table_booking_insights::models::weekday::DayOfWeek;
use table_booking_insights::services::analytics_service::AnalyticsService;
use table_booking_insights::services::api_client::{ApiClientConfig, HttpReservationsClient};

fn service_for(server: &MockServer) -> AnalyticsService<HttpReservationsClient> {
    let config = ApiClientConfig::new(server.base_url());
    let client = HttpReservationsClient::try_new(&config).expect("http client");
    AnalyticsService::new(Arc::new(client))
}

fn march() -> DateRange {
    DateRange {
        start_date: "2025-03-01".to_string(),
        end_date: "2025-03-15".to_string(),
    }
}

#[tokio::test]
async fn weekday_chart_and_stats_from_backend_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/analytics/restaurant/7/weekday")
                .query_param("startDate", "2025-03-01")
                .query_param("endDate", "2025-03-15");
            then.status(200).json_body(json!({
                "restaurantId": 7,
                "startDate": "2025-03-01",
                "endDate": "2025-03-15",
                "data": [
                    { "dayOfWeek": 2, "dayName": "Lunes", "bookings": 3, "avgGuests": 2.0 },
                    { "dayOfWeek": 3, "dayName": "Martes", "bookings": 0, "avgGuests": 0.0 },
                    { "dayOfWeek": 4, "dayName": "Miércoles", "bookings": 5, "avgGuests": 4.0 }
                ]
            }));
        })
        .await;

    let service = service_for(&server);
    let range = march();

    let chart = service
        .weekday_chart(7, Some(&range), false)
        .await
        .expect("chart");
    assert_eq!(chart.chart_data.len(), 7);
    assert_eq!(chart.chart_data[0].weekday, DayOfWeek::Monday);
    assert_eq!(chart.chart_data[0].count, 3);
    assert_eq!(chart.chart_data[2].count, 5);
    assert!(chart.chart_data[2].is_highest);
    assert_eq!(chart.response["restaurantId"], json!(7));

    let stats = service
        .dashboard_stats(7, Some(&range), false)
        .await
        .expect("stats");
    assert_eq!(stats.total_reservations, 8);
    assert_eq!(stats.average_per_day, 1);
    assert_eq!(
        stats.busiest_day,
        Some(DayHighlight {
            day: "Miércoles".to_string(),
            count: 5
        })
    );
    assert_eq!(
        stats.slowest_day,
        Some(DayHighlight {
            day: "Lunes".to_string(),
            count: 3
        })
    );

    // second call was served from cache
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn cache_is_bypassed_on_refresh_and_cleared_per_restaurant() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/analytics/restaurant/3/weekday");
            then.status(200)
                .json_body(json!([{ "weekday": "SATURDAY", "count": 11 }]));
        })
        .await;

    let service = service_for(&server);
    let range = march();

    service
        .weekday_distribution(3, Some(&range), false)
        .await
        .expect("first load");
    service
        .weekday_distribution(3, Some(&range), false)
        .await
        .expect("cached load");
    mock.assert_hits_async(1).await;

    service
        .weekday_distribution(3, Some(&range), true)
        .await
        .expect("forced load");
    mock.assert_hits_async(2).await;

    service.clear_cache_for_restaurant(99);
    service
        .weekday_distribution(3, Some(&range), false)
        .await
        .expect("other restaurant cleared");
    mock.assert_hits_async(2).await;

    service.clear_cache_for_restaurant(3);
    service
        .weekday_distribution(3, Some(&range), false)
        .await
        .expect("reload after clear");
    mock.assert_hits_async(3).await;

    service.clear_cache();
    service
        .weekday_distribution(3, None, false)
        .await
        .expect("load without range");
    mock.assert_hits_async(4).await;
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/analytics/restaurant/5/weekday");
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;

    let service = service_for(&server).with_cache_ttl(Duration::zero());
    service.weekday_chart(5, None, false).await.expect("first");
    service.weekday_chart(5, None, false).await.expect("second");
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn arbitrary_array_property_envelope_is_understood() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/analytics/restaurant/8/weekday");
            then.status(200).json_body(json!({
                "restaurantId": 8,
                "distribution": [
                    { "dayOfWeek": 1, "bookings": 6 },
                    { "dayOfWeek": 6, "bookings": 2 },
                    { "unexpected": true }
                ]
            }));
        })
        .await;

    let service = service_for(&server);
    let chart = service.weekday_chart(8, None, false).await.expect("chart");

    let sunday = &chart.chart_data[6];
    assert_eq!(sunday.weekday, DayOfWeek::Sunday);
    assert_eq!(sunday.count, 6);
    assert_eq!(sunday.percentage, 75);
    assert!(sunday.is_highest);

    let friday = &chart.chart_data[4];
    assert_eq!(friday.count, 2);
    assert_eq!(friday.percentage, 25);
}

#[tokio::test]
async fn non_array_payload_degrades_to_empty_week() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/analytics/restaurant/2/weekday");
            then.status(200).json_body(json!({ "message": "sin datos" }));
        })
        .await;

    let service = service_for(&server);
    let stats = service.dashboard_stats(2, None, false).await.expect("stats");
    assert_eq!(stats.total_reservations, 0);
    assert!(stats.busiest_day.is_none());
    assert!(stats.slowest_day.is_none());
}

#[tokio::test]
async fn access_token_is_sent_as_bearer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/analytics/restaurant/1/weekday")
                .header("authorization", "Bearer owner-token");
            then.status(200).json_body(json!([]));
        })
        .await;

    let config = ApiClientConfig::new(server.base_url()).with_access_token("owner-token");
    let client = HttpReservationsClient::try_new(&config).expect("http client");
    let service = AnalyticsService::new(Arc::new(client));

    service
        .weekday_distribution(1, None, false)
        .await
        .expect("authorized load");
    mock.assert_async().await;
}
