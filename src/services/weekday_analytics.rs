use crate::models::analytics::{DashboardStats, DayHighlight};
use crate::models::weekday::{BarTone, DayOfWeek, WeekdayChartEntry, WeekdayCount};

const DAYS_PER_WEEK: f64 = 7.0;
const SECONDARY_TONE_MIN_PERCENTAGE: u32 = 15;

/// Builds the seven chart rows, Monday first. Days absent from `counts` are
/// zero; when a day appears more than once the first record wins.
pub fn aggregate(counts: &[WeekdayCount]) -> Vec<WeekdayChartEntry> {
    let per_day: Vec<(DayOfWeek, u64)> = DayOfWeek::CANONICAL_ORDER
        .iter()
        .map(|day| (*day, count_for(counts, *day)))
        .collect();

    let total = per_day
        .iter()
        .fold(0u64, |sum, (_, count)| sum.saturating_add(*count));
    let max_count = per_day.iter().map(|(_, count)| *count).max().unwrap_or(0);

    per_day
        .into_iter()
        .map(|(weekday, count)| WeekdayChartEntry {
            weekday,
            label: weekday.label().to_string(),
            short_label: weekday.short_label().to_string(),
            count,
            percentage: percentage_of(count, total),
            is_highest: count == max_count && count > 0,
        })
        .collect()
}

pub fn summarize(chart: &[WeekdayChartEntry]) -> DashboardStats {
    let total_reservations = chart
        .iter()
        .fold(0u64, |sum, entry| sum.saturating_add(entry.count));
    let has_any_data = chart.iter().any(|entry| entry.count > 0);

    let average_per_day = if has_any_data {
        (total_reservations as f64 / DAYS_PER_WEEK).round() as u64
    } else {
        0
    };

    // Ties resolve to the earliest day in chart order.
    let busiest = chart.iter().fold(None::<&WeekdayChartEntry>, |best, entry| match best {
        Some(current) if entry.count <= current.count => Some(current),
        _ => Some(entry),
    });
    let slowest = chart
        .iter()
        .filter(|entry| entry.count > 0)
        .fold(None::<&WeekdayChartEntry>, |best, entry| match best {
            Some(current) if entry.count >= current.count => Some(current),
            _ => Some(entry),
        });

    DashboardStats {
        total_reservations,
        average_per_day,
        busiest_day: busiest.filter(|entry| entry.count > 0).map(highlight),
        slowest_day: slowest.map(highlight),
    }
}

pub fn has_data(chart: &[WeekdayChartEntry]) -> bool {
    chart.iter().any(|entry| entry.count > 0)
}

/// Bar length in percent of the busiest day.
pub fn bar_width(count: u64, chart: &[WeekdayChartEntry]) -> f64 {
    let max_count = chart.iter().map(|entry| entry.count).max().unwrap_or(0).max(1);
    count as f64 / max_count as f64 * 100.0
}

pub fn bar_tone(entry: &WeekdayChartEntry) -> BarTone {
    if entry.is_highest {
        BarTone::Highlight
    } else if entry.percentage >= SECONDARY_TONE_MIN_PERCENTAGE {
        BarTone::Secondary
    } else {
        BarTone::Muted
    }
}

fn count_for(counts: &[WeekdayCount], day: DayOfWeek) -> u64 {
    counts
        .iter()
        .find(|record| record.weekday == day)
        .map(|record| record.count)
        .unwrap_or(0)
}

fn percentage_of(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

fn highlight(entry: &WeekdayChartEntry) -> DayHighlight {
    DayHighlight {
        day: entry.label.clone(),
        count: entry.count,
    }
}
