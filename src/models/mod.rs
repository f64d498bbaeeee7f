pub mod analytics;
pub mod availability;
pub mod schedule;
pub mod weekday;
