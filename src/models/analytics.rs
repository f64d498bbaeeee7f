use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::models::weekday::WeekdayChartEntry;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DateRangePreset {
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "thisMonth")]
    ThisMonth,
    #[serde(rename = "lastMonth")]
    LastMonth,
    #[serde(rename = "thisYear")]
    ThisYear,
    #[serde(rename = "custom")]
    Custom,
}

impl DateRangePreset {
    pub const ALL: [DateRangePreset; 6] = [
        DateRangePreset::Last7Days,
        DateRangePreset::Last30Days,
        DateRangePreset::ThisMonth,
        DateRangePreset::LastMonth,
        DateRangePreset::ThisYear,
        DateRangePreset::Custom,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DateRangePreset::Last7Days => "last7days",
            DateRangePreset::Last30Days => "last30days",
            DateRangePreset::ThisMonth => "thisMonth",
            DateRangePreset::LastMonth => "lastMonth",
            DateRangePreset::ThisYear => "thisYear",
            DateRangePreset::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRangePreset::Last7Days => "Últimos 7 días",
            DateRangePreset::Last30Days => "Últimos 30 días",
            DateRangePreset::ThisMonth => "Este mes",
            DateRangePreset::LastMonth => "Mes anterior",
            DateRangePreset::ThisYear => "Este año",
            DateRangePreset::Custom => "Personalizado",
        }
    }
}

impl Default for DateRangePreset {
    fn default() -> Self {
        DateRangePreset::Last30Days
    }
}

impl fmt::Display for DateRangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown date range preset: {0}")]
pub struct UnknownPreset(pub String);

impl FromStr for DateRangePreset {
    type Err = UnknownPreset;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DateRangePreset::ALL
            .into_iter()
            .find(|preset| preset.key() == value)
            .ok_or_else(|| UnknownPreset(value.to_string()))
    }
}

/// Inclusive date range with both ends as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHighlight {
    pub day: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_reservations: u64,
    pub average_per_day: u64,
    pub busiest_day: Option<DayHighlight>,
    pub slowest_day: Option<DayHighlight>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayChartResponse {
    /// Payload exactly as the backend returned it.
    pub response: JsonValue,
    pub chart_data: Vec<WeekdayChartEntry>,
}
