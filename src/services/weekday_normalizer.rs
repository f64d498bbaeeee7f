use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{debug, warn};

use crate::models::weekday::{DayOfWeek, WeekdayCount, WeekdayRecord};

/// Backend indices outside 1..=7 land on this day.
const FALLBACK_DAY: DayOfWeek = DayOfWeek::Monday;

/// Finds the item list inside a distribution payload: `{ "data": [...] }`,
/// a bare array, or an object with some other array-valued property.
pub fn extract_distribution_items(response: &JsonValue) -> Option<&Vec<JsonValue>> {
    match response {
        JsonValue::Array(items) => Some(items),
        JsonValue::Object(map) => map
            .get("data")
            .and_then(JsonValue::as_array)
            .or_else(|| map.values().find_map(JsonValue::as_array)),
        _ => None,
    }
}

/// Normalizes whatever the backend sent. Non-array input yields no records.
pub fn normalize(raw: &JsonValue) -> Vec<WeekdayRecord> {
    match raw.as_array() {
        Some(items) => normalize_items(items),
        None => {
            if !raw.is_null() {
                warn!(
                    target: "app::analytics",
                    kind = json_kind(raw),
                    "weekday distribution is not an array, treating as empty"
                );
            }
            Vec::new()
        }
    }
}

pub fn normalize_items(items: &[JsonValue]) -> Vec<WeekdayRecord> {
    items.iter().map(normalize_item).collect()
}

pub fn known_counts(records: &[WeekdayRecord]) -> Vec<WeekdayCount> {
    records
        .iter()
        .filter_map(WeekdayRecord::as_count)
        .cloned()
        .collect()
}

fn normalize_item(item: &JsonValue) -> WeekdayRecord {
    let Some(map) = item.as_object() else {
        return unrecognized(item);
    };

    if let Some(record) = canonical_shape(map) {
        return WeekdayRecord::Known(record);
    }

    if let Some(record) = backend_shape(map) {
        return WeekdayRecord::Known(record);
    }

    unrecognized(item)
}

fn canonical_shape(map: &JsonMap<String, JsonValue>) -> Option<WeekdayCount> {
    let weekday = map.get("weekday")?.as_str()?.parse::<DayOfWeek>().ok()?;
    let count = count_value(map.get("count")?)?;
    Some(WeekdayCount {
        weekday,
        count,
        avg_guests: map.get("avgGuests").and_then(JsonValue::as_f64),
    })
}

fn backend_shape(map: &JsonMap<String, JsonValue>) -> Option<WeekdayCount> {
    let index = integer_value(map.get("dayOfWeek")?)?;
    let count = count_value(map.get("bookings")?)?;
    let weekday = DayOfWeek::from_backend_index(index).unwrap_or_else(|| {
        debug!(
            target: "app::analytics",
            index,
            "backend day index out of range, using fallback day"
        );
        FALLBACK_DAY
    });

    Some(WeekdayCount {
        weekday,
        count,
        avg_guests: Some(map.get("avgGuests").and_then(JsonValue::as_f64).unwrap_or(0.0)),
    })
}

/// `u64::MAX` rounds up to 2^64 as an `f64`, so the bound is exclusive.
const MAX_COUNT_AS_F64: f64 = u64::MAX as f64;

fn count_value(value: &JsonValue) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|number| {
                number.is_finite()
                    && *number >= 0.0
                    && *number < MAX_COUNT_AS_F64
                    && number.fract() == 0.0
            })
            .map(|number| number as u64)
    })
}

fn integer_value(value: &JsonValue) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.is_finite() && number.fract() == 0.0)
            .map(|number| number as i64)
    })
}

fn unrecognized(item: &JsonValue) -> WeekdayRecord {
    debug!(target: "app::analytics", item = %item, "unrecognized weekday record kept as-is");
    WeekdayRecord::Unrecognized(item.clone())
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
