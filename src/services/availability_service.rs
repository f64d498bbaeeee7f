use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::AppResult;
use crate::models::availability::{
    AvailabilityResponse, SlotPeriod, SlotStatus, SlotsByPeriod, TimeSlot,
};
use crate::services::api_client::ReservationsApi;
use crate::services::schedule_utils::slot_hour;

pub const DEFAULT_PARTY_SIZE: u32 = 1;

/// Share of total capacity under which a slot is shown as running out.
const LIMITED_CAPACITY_RATIO: f64 = 0.25;

/// Classifies a slot for a party of `num_people`. Never returns `Selected`;
/// see [`display_status`] for the override.
pub fn slot_status(slot: &TimeSlot, num_people: u32) -> SlotStatus {
    if !slot.available || slot.remaining_capacity == 0 {
        return SlotStatus::Full;
    }
    if slot.remaining_capacity < num_people {
        return SlotStatus::Full;
    }
    if is_running_low(slot) {
        return SlotStatus::Limited;
    }
    SlotStatus::Available
}

pub fn display_status(slot: &TimeSlot, num_people: u32, selected_time: Option<&str>) -> SlotStatus {
    if selected_time == Some(slot.time.as_str()) {
        return SlotStatus::Selected;
    }
    slot_status(slot, num_people)
}

pub fn has_capacity(slot: &TimeSlot, num_people: u32) -> bool {
    slot.available && slot.remaining_capacity >= num_people
}

pub fn capacity_text(slot: &TimeSlot, num_people: u32) -> String {
    if !slot.available || slot.remaining_capacity == 0 {
        return "Completo".to_string();
    }
    if slot.remaining_capacity < num_people {
        return format!("Solo {} plazas", slot.remaining_capacity);
    }
    if is_running_low(slot) {
        return format!("¡Últimas {} plazas!", slot.remaining_capacity);
    }
    format!("{} libres", slot.remaining_capacity)
}

pub fn filter_available_slots(
    availability: &AvailabilityResponse,
    num_people: u32,
) -> AvailabilityResponse {
    AvailabilityResponse {
        slots: availability
            .slots
            .iter()
            .filter(|slot| has_capacity(slot, num_people))
            .cloned()
            .collect(),
        ..availability.clone()
    }
}

pub fn available_count(availability: &AvailabilityResponse, num_people: u32) -> usize {
    availability
        .slots
        .iter()
        .filter(|slot| has_capacity(slot, num_people))
        .count()
}

pub fn next_open_day(week: &[AvailabilityResponse]) -> Option<&AvailabilityResponse> {
    week.iter()
        .find(|day| day.is_open && day.slots.iter().any(|slot| slot.available))
}

pub fn slot_period(time: &str) -> Option<SlotPeriod> {
    slot_hour(time).map(SlotPeriod::from_hour)
}

/// Slots whose hour cannot be read end up in no group.
pub fn group_slots_by_period(slots: &[TimeSlot]) -> SlotsByPeriod {
    let mut groups = SlotsByPeriod::default();
    for slot in slots {
        match slot_period(&slot.time) {
            Some(SlotPeriod::Morning) => groups.morning.push(slot.clone()),
            Some(SlotPeriod::Afternoon) => groups.afternoon.push(slot.clone()),
            Some(SlotPeriod::Evening) => groups.evening.push(slot.clone()),
            None => {}
        }
    }
    groups
}

fn is_running_low(slot: &TimeSlot) -> bool {
    f64::from(slot.remaining_capacity) < f64::from(slot.max_capacity) * LIMITED_CAPACITY_RATIO
}

pub struct AvailabilityService<A: ReservationsApi> {
    api: Arc<A>,
}

impl<A: ReservationsApi> AvailabilityService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn day(&self, restaurant_id: i64, date: NaiveDate) -> AppResult<AvailabilityResponse> {
        let availability = self.api.availability(restaurant_id, date).await?;
        debug!(
            target: "app::availability",
            restaurant_id,
            date = %date,
            is_open = availability.is_open,
            slots = availability.slots.len(),
            "availability loaded"
        );
        Ok(availability)
    }

    /// Day availability restricted to slots that fit the party.
    pub async fn bookable_slots(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
        num_people: u32,
    ) -> AppResult<AvailabilityResponse> {
        let availability = self.day(restaurant_id, date).await?;
        Ok(filter_available_slots(&availability, num_people))
    }

    pub async fn week(
        &self,
        restaurant_id: i64,
        start_date: NaiveDate,
    ) -> AppResult<Vec<AvailabilityResponse>> {
        self.api.week_availability(restaurant_id, start_date).await
    }

    pub async fn next_open_day(
        &self,
        restaurant_id: i64,
        start_date: NaiveDate,
    ) -> AppResult<Option<AvailabilityResponse>> {
        let week = self.week(restaurant_id, start_date).await?;
        let found = next_open_day(&week).cloned();
        if found.is_none() {
            debug!(
                target: "app::availability",
                restaurant_id,
                start_date = %start_date,
                "no open day in the requested week"
            );
        }
        Ok(found)
    }
}
