pub mod analytics_service;
pub mod api_client;
pub mod availability_service;
pub mod date_range;
pub mod schedule_service;
pub mod schedule_utils;
pub mod weekday_analytics;
pub mod weekday_normalizer;
