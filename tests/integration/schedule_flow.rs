use std::sync::Arc;

use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use table_booking_insights::error::ApiErrorCode;
use table_booking_insights::models::weekday::DayOfWeek;
use table_booking_insights::services::api_client::{ApiClientConfig, HttpReservationsClient};
use table_booking_insights::services::schedule_service::{
    has_schedules_configured, open_days, schedule_for_day, ScheduleService,
};

fn service_for(server: &MockServer) -> ScheduleService<HttpReservationsClient> {
    let client = HttpReservationsClient::try_new(&ApiClientConfig::new(server.base_url()))
        .expect("http client");
    ScheduleService::new(Arc::new(client))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn weekly_schedule_is_read_from_the_backend() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/restaurants/5/schedules");
            then.status(200).json_body(json!([
                {
                    "id": 1,
                    "restaurant": { "id": 5, "name": "Casa Pepe" },
                    "dayOfWeek": "MONDAY",
                    "isOpen": false,
                    "openTime": "09:00:00",
                    "closeTime": "23:00:00",
                    "maxCapacity": 50,
                    "maxCapacityPerSlot": 20,
                    "slotIntervalMinutes": 30
                },
                {
                    "id": 2,
                    "dayOfWeek": "FRIDAY",
                    "isOpen": true,
                    "openTime": "12:00:00",
                    "closeTime": "23:30:00",
                    "lunchStartTime": "13:00:00",
                    "lunchEndTime": "16:00:00",
                    "dinnerStartTime": "20:00:00",
                    "dinnerEndTime": "23:30:00",
                    "maxCapacity": 80,
                    "maxCapacityPerSlot": 25
                }
            ]));
        })
        .await;

    let service = service_for(&server);
    let schedules = service.schedules(5).await.expect("schedules");
    mock.assert_async().await;

    assert_eq!(schedules.len(), 2);
    assert!(has_schedules_configured(&schedules));
    assert_eq!(open_days(&schedules), vec![DayOfWeek::Friday]);

    let friday = schedule_for_day(&schedules, DayOfWeek::Friday).expect("friday schedule");
    assert_eq!(friday.dinner_start_time.as_deref(), Some("20:00:00"));
    assert_eq!(friday.slot_interval_minutes, 30);
    assert!(schedule_for_day(&schedules, DayOfWeek::Sunday).is_none());
}

#[tokio::test]
async fn yearly_closed_date_applies_to_later_years() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/restaurants/5/closed-dates");
            then.status(200).json_body(json!([
                { "id": 10, "closedDate": "2024-12-25", "reason": "Navidad", "isRecurringYearly": true },
                { "id": 11, "closedDate": "2025-08-15", "isRecurringYearly": false }
            ]));
        })
        .await;

    let service = service_for(&server);

    let christmas = service
        .closure_on(5, date(2026, 12, 25))
        .await
        .expect("closed dates");
    assert_eq!(christmas.and_then(|c| c.reason), Some("Navidad".to_string()));

    let holiday = service
        .closure_on(5, date(2025, 8, 15))
        .await
        .expect("closed dates");
    assert_eq!(holiday.map(|c| c.id), Some(Some(11)));

    let open = service
        .closure_on(5, date(2026, 8, 15))
        .await
        .expect("closed dates");
    assert!(open.is_none());

    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn schedule_errors_use_the_shared_mapping() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/restaurants/5/schedules");
            then.status(401);
        })
        .await;

    let err = service_for(&server)
        .schedules(5)
        .await
        .expect_err("unauthorized");
    assert_eq!(err.api_code(), Some(ApiErrorCode::Unauthorized));
    assert_eq!(err.api_status(), Some(401));
}
