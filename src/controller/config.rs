// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration types for the sync controller.

use std::time::Duration;

use crate::error::ValueError;

/// Default serial baud rate.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default bound on every response read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Default period for the IRE, pattern and resolution polls.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(20);

/// Default period for the temperature poll.
pub const DEFAULT_TEMPERATURE_PERIOD: Duration = Duration::from_secs(60);

/// Default delay between a query and its response read.
pub const DEFAULT_FOLLOWUP_DELAY: Duration = Duration::from_millis(100);

/// Default delay between the identify query and its response read.
pub const DEFAULT_IDENTIFY_DELAY: Duration = Duration::from_millis(100);

/// Default delay between identification and the first poll of each task.
pub const DEFAULT_FIRST_POLL_DELAY: Duration = Duration::from_millis(500);

/// Default sampling period for external tracking.
pub const DEFAULT_OBSERVER_PERIOD: Duration = Duration::from_millis(500);

/// Default event bus capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Serial line settings.
///
/// The baud rate is informational: whoever opens the port applies it. The
/// read timeout bounds every response read on the link.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vtgsync::controller::SerialSettings;
///
/// let settings = SerialSettings::default().with_read_timeout(Duration::from_millis(500));
/// assert_eq!(settings.baud_rate, 9600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialSettings {
    /// Line speed in bits per second.
    pub baud_rate: u32,
    /// Maximum wait for one response line.
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl SerialSettings {
    /// Sets the baud rate.
    #[must_use]
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

/// Timing and capacity settings for a [`SyncController`](super::SyncController).
///
/// Poll periods, the observer period and the event capacity must be
/// non-zero; [`validate`](Self::validate) checks them and
/// [`SyncController::with_config`](super::SyncController::with_config)
/// refuses a configuration that fails.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vtgsync::controller::SyncConfig;
///
/// let config = SyncConfig::default()
///     .with_temperature_period(Duration::from_secs(120))
///     .with_event_capacity(64);
///
/// assert_eq!(config.ire_period, Duration::from_secs(20));
/// assert_eq!(config.temperature_period, Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Serial line settings.
    pub serial: SerialSettings,
    /// IRE poll period.
    pub ire_period: Duration,
    /// Pattern poll period.
    pub pattern_period: Duration,
    /// Resolution poll period.
    pub resolution_period: Duration,
    /// Temperature poll period.
    pub temperature_period: Duration,
    /// Delay between a poll query and its response read.
    pub followup_delay: Duration,
    /// Delay between the identify query and its response read.
    pub identify_delay: Duration,
    /// Delay before the first poll of each task.
    pub first_poll_delay: Duration,
    /// External tracking sampling period.
    pub observer_period: Duration,
    /// Event bus capacity.
    pub event_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            serial: SerialSettings::default(),
            ire_period: DEFAULT_POLL_PERIOD,
            pattern_period: DEFAULT_POLL_PERIOD,
            resolution_period: DEFAULT_POLL_PERIOD,
            temperature_period: DEFAULT_TEMPERATURE_PERIOD,
            followup_delay: DEFAULT_FOLLOWUP_DELAY,
            identify_delay: DEFAULT_IDENTIFY_DELAY,
            first_poll_delay: DEFAULT_FIRST_POLL_DELAY,
            observer_period: DEFAULT_OBSERVER_PERIOD,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl SyncConfig {
    /// Creates a configuration with the default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the serial settings.
    #[must_use]
    pub fn with_serial(mut self, serial: SerialSettings) -> Self {
        self.serial = serial;
        self
    }

    /// Sets the IRE poll period.
    #[must_use]
    pub fn with_ire_period(mut self, period: Duration) -> Self {
        self.ire_period = period;
        self
    }

    /// Sets the pattern poll period.
    #[must_use]
    pub fn with_pattern_period(mut self, period: Duration) -> Self {
        self.pattern_period = period;
        self
    }

    /// Sets the resolution poll period.
    #[must_use]
    pub fn with_resolution_period(mut self, period: Duration) -> Self {
        self.resolution_period = period;
        self
    }

    /// Sets the temperature poll period.
    #[must_use]
    pub fn with_temperature_period(mut self, period: Duration) -> Self {
        self.temperature_period = period;
        self
    }

    /// Sets the poll follow-up delay.
    #[must_use]
    pub fn with_followup_delay(mut self, delay: Duration) -> Self {
        self.followup_delay = delay;
        self
    }

    /// Sets the identify follow-up delay.
    #[must_use]
    pub fn with_identify_delay(mut self, delay: Duration) -> Self {
        self.identify_delay = delay;
        self
    }

    /// Sets the delay before the first poll.
    #[must_use]
    pub fn with_first_poll_delay(mut self, delay: Duration) -> Self {
        self.first_poll_delay = delay;
        self
    }

    /// Sets the external tracking sampling period.
    #[must_use]
    pub fn with_observer_period(mut self, period: Duration) -> Self {
        self.observer_period = period;
        self
    }

    /// Sets the event bus capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Checks that every period and the event capacity are non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ZeroSetting`] naming the first zero setting.
    pub fn validate(&self) -> Result<(), ValueError> {
        let periods = [
            ("ire_period", self.ire_period),
            ("pattern_period", self.pattern_period),
            ("resolution_period", self.resolution_period),
            ("temperature_period", self.temperature_period),
            ("observer_period", self.observer_period),
        ];
        if let Some((name, _)) = periods.into_iter().find(|(_, period)| period.is_zero()) {
            return Err(ValueError::ZeroSetting(name));
        }
        if self.event_capacity == 0 {
            return Err(ValueError::ZeroSetting("event_capacity"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_generator_timings() {
        let config = SyncConfig::default();
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.read_timeout, Duration::from_secs(1));
        assert_eq!(config.ire_period, Duration::from_secs(20));
        assert_eq!(config.pattern_period, Duration::from_secs(20));
        assert_eq!(config.resolution_period, Duration::from_secs(20));
        assert_eq!(config.temperature_period, Duration::from_secs(60));
        assert_eq!(config.followup_delay, Duration::from_millis(100));
        assert_eq!(config.first_poll_delay, Duration::from_millis(500));
        assert_eq!(config.observer_period, Duration::from_millis(500));
        assert_eq!(config.event_capacity, 256);
    }

    #[test]
    fn builder_overrides() {
        let config = SyncConfig::new()
            .with_serial(SerialSettings::default().with_baud_rate(19_200))
            .with_ire_period(Duration::from_secs(5))
            .with_followup_delay(Duration::from_millis(50))
            .with_identify_delay(Duration::from_millis(200));

        assert_eq!(config.serial.baud_rate, 19_200);
        assert_eq!(config.ire_period, Duration::from_secs(5));
        assert_eq!(config.pattern_period, DEFAULT_POLL_PERIOD);
        assert_eq!(config.followup_delay, Duration::from_millis(50));
        assert_eq!(config.identify_delay, Duration::from_millis(200));
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SyncConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_periods_are_rejected() {
        let cases = [
            (SyncConfig::new().with_ire_period(Duration::ZERO), "ire_period"),
            (SyncConfig::new().with_pattern_period(Duration::ZERO), "pattern_period"),
            (
                SyncConfig::new().with_resolution_period(Duration::ZERO),
                "resolution_period",
            ),
            (
                SyncConfig::new().with_temperature_period(Duration::ZERO),
                "temperature_period",
            ),
            (SyncConfig::new().with_observer_period(Duration::ZERO), "observer_period"),
        ];
        for (config, name) in cases {
            assert_eq!(config.validate(), Err(ValueError::ZeroSetting(name)));
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = SyncConfig::new().with_event_capacity(0);
        assert_eq!(
            config.validate(),
            Err(ValueError::ZeroSetting("event_capacity"))
        );
    }

    #[test]
    fn zero_delays_are_allowed() {
        let config = SyncConfig::new()
            .with_followup_delay(Duration::ZERO)
            .with_identify_delay(Duration::ZERO)
            .with_first_poll_delay(Duration::ZERO);
        assert_eq!(config.validate(), Ok(()));
    }
}
