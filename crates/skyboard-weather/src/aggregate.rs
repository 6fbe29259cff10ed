//! Reduce 3-hour forecast samples to one summary per calendar day.

use chrono::{Local, NaiveDate, TimeZone};

use crate::types::{DailySummary, ForecastSample};

/// Most days shown on the dashboard.
pub const MAX_DAYS: usize = 7;

/// Label of the first summary, whatever its actual weekday.
pub const TODAY_LABEL: &str = "Today";

struct DayGroup {
    date: NaiveDate,
    icon_code: String,
    high: f64,
    low: f64,
}

/// Summarize samples by calendar day in the local time zone.
pub fn summarize_days(samples: &[ForecastSample]) -> Vec<DailySummary> {
    summarize_days_in(samples, &Local)
}

/// Summarize samples by calendar day in `tz`.
///
/// Days keep the order in which their first sample appears; samples are not
/// re-sorted. Each day takes the icon of its first sample, the highest
/// `temp_max` and the lowest `temp_min`. Only the first [`MAX_DAYS`] days are
/// kept, and days without samples never appear.
pub fn summarize_days_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailySummary> {
    let mut days: Vec<DayGroup> = Vec::with_capacity(MAX_DAYS);

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();

        if let Some(day) = days.iter_mut().find(|d| d.date == date) {
            day.high = day.high.max(sample.temp_max);
            day.low = day.low.min(sample.temp_min);
            continue;
        }

        if days.len() == MAX_DAYS {
            continue;
        }

        days.push(DayGroup {
            date,
            icon_code: sample.icon_code.clone(),
            high: sample.temp_max,
            low: sample.temp_min,
        });
    }

    tracing::debug!(
        samples = samples.len(),
        days = days.len(),
        "Summarized forecast"
    );

    days.into_iter()
        .enumerate()
        .map(|(i, day)| DailySummary {
            label: if i == 0 {
                TODAY_LABEL.to_string()
            } else {
                day.date.format("%a").to_string()
            },
            icon_code: day.icon_code,
            high: round_temp(day.high),
            low: round_temp(day.low),
        })
        .collect()
}

/// Round half to even, so 2.5 -> 2 and 3.5 -> 4.
pub fn round_temp(value: f64) -> i32 {
    value.round_ties_even() as i32
}
