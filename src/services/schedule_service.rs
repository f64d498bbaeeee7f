use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::AppResult;
use crate::models::schedule::{ClosedDate, RestaurantSchedule};
use crate::models::weekday::DayOfWeek;
use crate::services::api_client::ReservationsApi;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// First closed date matching `date` (`YYYY-MM-DD`). An exact match always
/// counts; yearly entries also match on month and day in any year.
pub fn is_date_closed<'a>(closed_dates: &'a [ClosedDate], date: &str) -> Option<&'a ClosedDate> {
    let target = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok();

    closed_dates.iter().find(|closed| {
        if closed.closed_date == date {
            return true;
        }
        if !closed.is_recurring_yearly {
            return false;
        }
        match (
            target,
            NaiveDate::parse_from_str(closed.closed_date.trim(), DATE_FORMAT).ok(),
        ) {
            (Some(target), Some(closed)) => {
                target.month() == closed.month() && target.day() == closed.day()
            }
            _ => false,
        }
    })
}

pub fn schedule_for_day(
    schedules: &[RestaurantSchedule],
    day_of_week: DayOfWeek,
) -> Option<&RestaurantSchedule> {
    schedules.iter().find(|schedule| schedule.day_of_week == day_of_week)
}

/// True when at least one day is configured as open.
pub fn has_schedules_configured(schedules: &[RestaurantSchedule]) -> bool {
    schedules.iter().any(|schedule| schedule.is_open)
}

pub fn open_days(schedules: &[RestaurantSchedule]) -> Vec<DayOfWeek> {
    schedules
        .iter()
        .filter(|schedule| schedule.is_open)
        .map(|schedule| schedule.day_of_week)
        .collect()
}

pub struct ScheduleService<A: ReservationsApi> {
    api: Arc<A>,
}

impl<A: ReservationsApi> ScheduleService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn schedules(&self, restaurant_id: i64) -> AppResult<Vec<RestaurantSchedule>> {
        let schedules = self.api.schedules(restaurant_id).await?;
        debug!(
            target: "app::schedule",
            restaurant_id,
            days = schedules.len(),
            "schedules loaded"
        );
        Ok(schedules)
    }

    pub async fn closed_dates(&self, restaurant_id: i64) -> AppResult<Vec<ClosedDate>> {
        self.api.closed_dates(restaurant_id).await
    }

    /// Closed-date entry covering `date`, if any.
    pub async fn closure_on(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> AppResult<Option<ClosedDate>> {
        let closed_dates = self.closed_dates(restaurant_id).await?;
        let formatted = date.format(DATE_FORMAT).to_string();
        Ok(is_date_closed(&closed_dates, &formatted).cloned())
    }
}
