//! Presenter seam and a plain-text renderer for it.

use std::io::Write;

use chrono::Local;
use parking_lot::Mutex;
use skyboard_core::Units;
use skyboard_weather::{icon_glyph, round_temp, CurrentConditions, DailySummary};

use crate::state::DisplayState;

const TIMESTAMP_FORMAT: &str = "%A, %B %d, %Y • %I:%M %p";

/// Receives the result of every refresh cycle.
///
/// Per cycle the scheduler calls either `show_state` (which shows current
/// conditions and the daily summaries) or `show_error`, never both.
/// Implementations own their output and may be called from any thread.
pub trait Presenter: Send + Sync {
    fn show_current(&self, current: &CurrentConditions, units: Units);

    fn show_daily_summaries(&self, days: &[DailySummary], units: Units);

    fn show_error(&self, message: &str);

    /// Show a complete snapshot from a successful cycle.
    fn show_state(&self, state: &DisplayState) {
        self.show_current(&state.current, state.units);
        self.show_daily_summaries(&state.days, state.units);
    }
}

/// Writes the dashboard as text blocks to any writer (stdout by default).
pub struct TextPresenter<W: Write + Send> {
    out: Mutex<W>,
}

impl TextPresenter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_block(&self, text: &str) {
        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!("Failed to write dashboard output: {}", e);
        }
    }
}

impl<W: Write + Send> Presenter for TextPresenter<W> {
    fn show_current(&self, current: &CurrentConditions, units: Units) {
        self.write_block(&render_current(current, units));
    }

    fn show_daily_summaries(&self, days: &[DailySummary], units: Units) {
        self.write_block(&render_days(days, units));
    }

    fn show_error(&self, message: &str) {
        self.write_block(&render_error(message));
    }

    fn show_state(&self, state: &DisplayState) {
        let mut text = render_current(&state.current, state.units);
        text.push('\n');
        text.push_str(&render_days(&state.days, state.units));
        self.write_block(&text);
    }
}

/// Header, big temperature, description and the info line.
pub fn render_current(current: &CurrentConditions, units: Units) -> String {
    let t = units.temperature_symbol();
    let updated = current
        .observed_at
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT);

    format!(
        "{city}\n{updated}\n\n  {temp}{t}  {description}\n  Feels like {feels}{t} • Humidity {humidity}% • Wind {wind} {speed}\n",
        city = current.city,
        temp = round_temp(current.temperature),
        description = title_case(&current.description),
        feels = round_temp(current.feels_like),
        humidity = current.humidity,
        wind = round_temp(current.wind_speed),
        speed = units.speed_symbol(),
    )
}

/// One line per day: label, glyph, high, low.
pub fn render_days(days: &[DailySummary], units: Units) -> String {
    let t = units.temperature_symbol();
    let mut text = String::from("7-Day Forecast\n");

    if days.is_empty() {
        text.push_str("  No forecast available\n");
    }

    for day in days {
        text.push_str(&format!(
            "  {:<6}{}  {:>6} {:>6}\n",
            day.label,
            icon_glyph(&day.icon_code),
            format!("{}{}", day.high, t),
            format!("{}{}", day.low, t),
        ));
    }

    text
}

pub fn render_error(message: &str) -> String {
    format!("Update Failed\n  {}\n", message)
}

/// Capitalize the first letter of every word, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }

    out
}
