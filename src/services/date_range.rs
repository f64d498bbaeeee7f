use chrono::{Datelike, Days, Local, NaiveDate};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::analytics::{DateRange, DateRangePreset};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SHORT_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Concrete range for `preset` as seen on `today`.
pub fn resolve_preset(preset: DateRangePreset, today: NaiveDate) -> DateRange {
    let (start, end) = match preset {
        DateRangePreset::Last7Days => (days_before(today, 7), today),
        DateRangePreset::Last30Days | DateRangePreset::Custom => (days_before(today, 30), today),
        DateRangePreset::ThisMonth => (first_of_month(today), today),
        DateRangePreset::LastMonth => {
            let last_of_previous = first_of_month(today).pred_opt().unwrap_or(today);
            (first_of_month(last_of_previous), last_of_previous)
        }
        DateRangePreset::ThisYear => (
            NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
            today,
        ),
    };

    DateRange {
        start_date: format_date(start),
        end_date: format_date(end),
    }
}

/// Same as [`resolve_preset`] using the local calendar date.
pub fn resolve_preset_today(preset: DateRangePreset) -> DateRange {
    resolve_preset(preset, Local::now().date_naive())
}

/// Unknown keys resolve like `last30days`.
pub fn range_for_key(key: &str, today: NaiveDate) -> DateRange {
    let preset = key.parse::<DateRangePreset>().unwrap_or_default();
    resolve_preset(preset, today)
}

pub fn validate_custom_range(start: Option<&str>, end: Option<&str>) -> AppResult<DateRange> {
    let (start, end) = match (non_blank(start), non_blank(end)) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(AppError::validation("Selecciona ambas fechas")),
    };

    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;
    if start_date > end_date {
        return Err(AppError::validation_with_details(
            "La fecha de inicio debe ser anterior a la fecha fin",
            json!({ "startDate": start, "endDate": end }),
        ));
    }

    Ok(DateRange {
        start_date: format_date(start_date),
        end_date: format_date(end_date),
    })
}

/// Short Spanish label such as `"1 mar - 15 mar"`; empty when a bound is unreadable.
pub fn date_range_label(range: &DateRange) -> String {
    let parse = |value: &str| NaiveDate::parse_from_str(value, DATE_FORMAT).ok();
    match (parse(&range.start_date), parse(&range.end_date)) {
        (Some(start), Some(end)) => format!("{} - {}", short_day(start), short_day(end)),
        _ => String::new(),
    }
}

pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| {
        AppError::validation_with_details(
            "Formato de fecha no válido",
            json!({ "value": value, "error": err.to_string() }),
        )
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn short_day(date: NaiveDate) -> String {
    format!("{} {}", date.day(), SHORT_MONTHS[date.month0() as usize])
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}
