use serde::{Deserialize, Serialize};

use crate::models::weekday::DayOfWeek;

pub const DEFAULT_OPEN_TIME: &str = "09:00:00";
pub const DEFAULT_CLOSE_TIME: &str = "23:00:00";
pub const DEFAULT_MAX_CAPACITY: u32 = 50;
pub const DEFAULT_MAX_CAPACITY_PER_SLOT: u32 = 20;
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;

/// Opening hours and capacity for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub day_of_week: DayOfWeek,
    pub is_open: bool,
    /// `HH:mm:ss`
    pub open_time: String,
    pub close_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner_end_time: Option<String>,
    pub max_capacity: u32,
    pub max_capacity_per_slot: u32,
    #[serde(default = "default_slot_interval")]
    pub slot_interval_minutes: u32,
}

impl RestaurantSchedule {
    /// Open 09:00-23:00 with the default capacities.
    pub fn default_for(day_of_week: DayOfWeek) -> Self {
        Self {
            id: None,
            day_of_week,
            is_open: true,
            open_time: DEFAULT_OPEN_TIME.to_string(),
            close_time: DEFAULT_CLOSE_TIME.to_string(),
            lunch_start_time: None,
            lunch_end_time: None,
            dinner_start_time: None,
            dinner_end_time: None,
            max_capacity: DEFAULT_MAX_CAPACITY,
            max_capacity_per_slot: DEFAULT_MAX_CAPACITY_PER_SLOT,
            slot_interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
        }
    }
}

fn default_slot_interval() -> u32 {
    DEFAULT_SLOT_INTERVAL_MINUTES
}

/// A day the restaurant does not take bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// `YYYY-MM-DD`
    pub closed_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Closed on the same month and day every year.
    #[serde(default)]
    pub is_recurring_yearly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
