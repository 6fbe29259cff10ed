//! Timer-driven refresh loop.
//!
//! One cycle fetches current conditions, then the forecast for the returned
//! coordinates, summarizes the forecast and hands the result to the
//! presenter. Cycles never overlap; the next timed cycle starts a fixed
//! interval after the previous one finished.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use skyboard_core::config::{API_KEY_ENV, REFRESH_INTERVAL_SECS};
use skyboard_core::{AppError, Config, ConfigError, Units};
use skyboard_weather::{summarize_days, WeatherClient};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use crate::presenter::Presenter;
use crate::state::{DisplayState, RefreshState};

/// Result of one refresh cycle.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    Updated(Arc<DisplayState>),
    /// The message that was shown to the user.
    Failed(String),
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Updated(_))
    }
}

pub struct RefreshScheduler {
    /// `None` when no API key is configured; every cycle then fails fast.
    client: Option<Arc<WeatherClient>>,
    city: String,
    presenter: Arc<dyn Presenter>,
    interval: Duration,
    state: Mutex<RefreshState>,
    latest: RwLock<Option<Arc<DisplayState>>>,
    trigger: Notify,
}

impl RefreshScheduler {
    pub fn new(
        client: Option<WeatherClient>,
        city: impl Into<String>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            client: client.map(Arc::new),
            city: city.into(),
            presenter,
            interval: Duration::from_secs(REFRESH_INTERVAL_SECS),
            state: Mutex::new(RefreshState::Idle),
            latest: RwLock::new(None),
            trigger: Notify::new(),
        }
    }

    /// Build from configuration. A missing API key is not an error here: the
    /// scheduler still runs and reports the missing key every cycle.
    pub fn from_config(config: &Config, presenter: Arc<dyn Presenter>) -> Result<Self, AppError> {
        let weather = &config.weather;
        let client = match weather.api_key() {
            Some(key) => Some(WeatherClient::new(
                key,
                &weather.api_base_url,
                weather.units,
            )?),
            None => {
                tracing::warn!("{} not set; weather updates disabled", API_KEY_ENV);
                None
            }
        };

        Ok(Self::new(client, weather.city.clone(), presenter))
    }

    /// Override the delay between cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Units of the configured client, metric when there is none.
    pub fn units(&self) -> Units {
        self.client
            .as_ref()
            .map(|c| c.units())
            .unwrap_or_default()
    }

    pub fn state(&self) -> RefreshState {
        *self.state.lock()
    }

    pub fn is_refreshing(&self) -> bool {
        !self.state().can_start_refresh()
    }

    /// The snapshot from the most recent successful cycle.
    pub fn latest(&self) -> Option<Arc<DisplayState>> {
        self.latest.read().clone()
    }

    /// Ask the running loop for an immediate cycle.
    ///
    /// Ignored (not queued) while a cycle is in flight; returns whether the
    /// request was passed on.
    pub fn request_refresh(&self) -> bool {
        if self.is_refreshing() {
            tracing::debug!("Refresh already in progress, ignoring trigger");
            return false;
        }
        self.trigger.notify_waiters();
        true
    }

    /// Run one cycle now. Returns `None` without doing anything if another
    /// cycle is already in flight.
    pub async fn refresh_now(&self) -> Option<CycleOutcome> {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("Refresh already in progress, skipping");
            return None;
        };

        tracing::info!(city = %self.city, "Refreshing weather");

        let outcome = match self.run_cycle().await {
            Ok(state) => {
                let state = Arc::new(state);
                *self.latest.write() = Some(Arc::clone(&state));
                self.presenter.show_state(&state);
                tracing::info!(days = state.days.len(), "Weather updated");
                CycleOutcome::Updated(state)
            }
            Err(e) => {
                tracing::error!("Error updating weather: {}", e);
                let message = e.display_message();
                self.presenter.show_error(&message);
                CycleOutcome::Failed(message)
            }
        };

        Some(outcome)
    }

    /// Refresh immediately, then every `interval` after each cycle completes
    /// or on `request_refresh`, until `cancel` fires.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Refresh loop started"
        );

        loop {
            // Armed before the cycle so a trigger sent right after it ends is kept.
            let trigger = self.trigger.notified();
            tokio::pin!(trigger);
            trigger.as_mut().enable();

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.refresh_now() => {}
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut trigger => {
                    tracing::info!("Manual refresh requested");
                }
            }
        }

        tracing::info!("Refresh loop stopped");
    }

    async fn run_cycle(&self) -> Result<DisplayState, AppError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ConfigError::MissingSetting(API_KEY_ENV.to_string()))?;

        let current = client.fetch_current(&self.city).await?;
        let samples = client.fetch_forecast(current.coordinates).await?;
        let days = summarize_days(&samples);

        Ok(DisplayState {
            current,
            days,
            units: client.units(),
        })
    }

    fn try_begin(&self) -> Option<RefreshGuard<'_>> {
        let mut state = self.state.lock();
        if !state.can_start_refresh() {
            return None;
        }
        *state = RefreshState::Refreshing;
        Some(RefreshGuard { state: &self.state })
    }
}

/// Returns the scheduler to `Idle` when a cycle ends, including when the
/// cycle's future is dropped mid-flight.
struct RefreshGuard<'a> {
    state: &'a Mutex<RefreshState>,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        *state = state.on_refresh_done();
    }
}
