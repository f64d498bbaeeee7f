use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Start of the slot as `HH:mm`.
    pub time: String,
    pub available: bool,
    pub remaining_capacity: u32,
    pub max_capacity: u32,
}

impl TimeSlot {
    /// Builds a slot, rejecting capacity values the backend would never send.
    pub fn try_new(
        time: impl Into<String>,
        available: bool,
        remaining_capacity: u32,
        max_capacity: u32,
    ) -> AppResult<Self> {
        if max_capacity == 0 {
            return Err(AppError::validation(
                "La capacidad máxima del turno debe ser mayor que cero",
            ));
        }
        if remaining_capacity > max_capacity {
            return Err(AppError::validation_with_details(
                "La capacidad restante supera la capacidad máxima",
                serde_json::json!({
                    "remainingCapacity": remaining_capacity,
                    "maxCapacity": max_capacity,
                }),
            ));
        }

        Ok(Self {
            time: time.into(),
            available,
            remaining_capacity,
            max_capacity,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Limited,
    Full,
    Selected,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::Limited => "limited",
            SlotStatus::Full => "full",
            SlotStatus::Selected => "selected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotStatus::Available => "Disponible",
            SlotStatus::Limited => "Pocas plazas",
            SlotStatus::Full => "Lleno",
            SlotStatus::Selected => "Seleccionado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub restaurant_id: i64,
    /// Day the slots belong to, `YYYY-MM-DD`.
    pub date: String,
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_reason: Option<String>,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl SlotPeriod {
    /// Hours outside 6..=17, negative ones included, count as evening.
    pub fn from_hour(hour: i64) -> Self {
        match hour {
            6..=11 => SlotPeriod::Morning,
            12..=17 => SlotPeriod::Afternoon,
            _ => SlotPeriod::Evening,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsByPeriod {
    pub morning: Vec<TimeSlot>,
    pub afternoon: Vec<TimeSlot>,
    pub evening: Vec<TimeSlot>,
}
