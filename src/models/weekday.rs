use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Order used for charts and summaries.
    pub const CANONICAL_ORDER: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Lunes",
            DayOfWeek::Tuesday => "Martes",
            DayOfWeek::Wednesday => "Miércoles",
            DayOfWeek::Thursday => "Jueves",
            DayOfWeek::Friday => "Viernes",
            DayOfWeek::Saturday => "Sábado",
            DayOfWeek::Sunday => "Domingo",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Lun",
            DayOfWeek::Tuesday => "Mar",
            DayOfWeek::Wednesday => "Mié",
            DayOfWeek::Thursday => "Jue",
            DayOfWeek::Friday => "Vie",
            DayOfWeek::Saturday => "Sáb",
            DayOfWeek::Sunday => "Dom",
        }
    }

    /// Backend day numbering: 1 is Sunday, 7 is Saturday.
    pub fn from_backend_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(DayOfWeek::Sunday),
            2 => Some(DayOfWeek::Monday),
            3 => Some(DayOfWeek::Tuesday),
            4 => Some(DayOfWeek::Wednesday),
            5 => Some(DayOfWeek::Thursday),
            6 => Some(DayOfWeek::Friday),
            7 => Some(DayOfWeek::Saturday),
            _ => None,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown day of week: {0}")]
pub struct UnknownDayOfWeek(pub String);

impl FromStr for DayOfWeek {
    type Err = UnknownDayOfWeek;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DayOfWeek::CANONICAL_ORDER
            .into_iter()
            .find(|day| day.as_str() == value)
            .ok_or_else(|| UnknownDayOfWeek(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayCount {
    pub weekday: DayOfWeek,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_guests: Option<f64>,
}

impl WeekdayCount {
    pub fn new(weekday: DayOfWeek, count: u64) -> Self {
        Self {
            weekday,
            count,
            avg_guests: None,
        }
    }
}

/// One item of a weekday distribution after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeekdayRecord {
    Known(WeekdayCount),
    /// Shape the normalizer did not recognize, kept verbatim.
    Unrecognized(JsonValue),
}

impl WeekdayRecord {
    pub fn as_count(&self) -> Option<&WeekdayCount> {
        match self {
            WeekdayRecord::Known(count) => Some(count),
            WeekdayRecord::Unrecognized(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayChartEntry {
    pub weekday: DayOfWeek,
    pub label: String,
    pub short_label: String,
    pub count: u64,
    pub percentage: u32,
    pub is_highest: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarTone {
    Highlight,
    Secondary,
    Muted,
}
