//! Typed dashboard settings.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use trellis::calendar::{CalendarView, DEFAULT_SNAP_MINUTES};
use trellis::table::DEFAULT_PAGE_SIZE;

use super::{SettingsError, SettingsProvider};

const PREFIX: &str = "dashboard.";

const PAGE_SIZE: &str = "page_size";
const DEFAULT_VIEW: &str = "default_view";
const WEEK_START: &str = "week_start";
const SNAP_MINUTES: &str = "snap_minutes";
const SUBMIT_DELAY_MS: &str = "submit_delay_ms";

/// Settings names accepted by [`DashboardSettings::set`].
pub const KEYS: [&str; 5] = [PAGE_SIZE, DEFAULT_VIEW, WEEK_START, SNAP_MINUTES, SUBMIT_DELAY_MS];

/// User-adjustable dashboard behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Rows per table page.
    pub page_size: usize,
    /// Calendar view shown on start.
    pub default_view: CalendarView,
    /// First day of calendar weeks.
    pub week_start: Weekday,
    /// Drag and slot-click snapping.
    pub snap_minutes: u32,
    /// Simulated latency of form submits.
    pub submit_delay_ms: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_view: CalendarView::Week,
            week_start: Weekday::Sun,
            snap_minutes: DEFAULT_SNAP_MINUTES,
            submit_delay_ms: 400,
        }
    }
}

impl DashboardSettings {
    /// Load every setting, falling back to the default for missing keys.
    pub async fn load(settings: &SettingsProvider) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        Ok(Self {
            page_size: settings.get_or(&key(PAGE_SIZE), defaults.page_size).await?,
            default_view: settings.get_or(&key(DEFAULT_VIEW), defaults.default_view).await?,
            week_start: settings.get_or(&key(WEEK_START), defaults.week_start).await?,
            snap_minutes: settings.get_or(&key(SNAP_MINUTES), defaults.snap_minutes).await?,
            submit_delay_ms: settings
                .get_or(&key(SUBMIT_DELAY_MS), defaults.submit_delay_ms)
                .await?,
        })
    }

    /// Store every setting.
    pub async fn save(&self, settings: &SettingsProvider) -> Result<(), SettingsError> {
        settings.set(&key(PAGE_SIZE), &self.page_size).await?;
        settings.set(&key(DEFAULT_VIEW), &self.default_view).await?;
        settings.set(&key(WEEK_START), &self.week_start).await?;
        settings.set(&key(SNAP_MINUTES), &self.snap_minutes).await?;
        settings.set(&key(SUBMIT_DELAY_MS), &self.submit_delay_ms).await?;
        log::debug!("saved dashboard settings: {:?}", self);
        Ok(())
    }

    /// Change one setting from user input.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), SettingsError> {
        match name {
            PAGE_SIZE => match value.parse::<usize>() {
                Ok(size) if size > 0 => self.page_size = size,
                _ => return Err(SettingsError::invalid(name, value, "expected a positive number")),
            },
            DEFAULT_VIEW => {
                self.default_view = value
                    .parse()
                    .map_err(|e: trellis::calendar::ParseViewError| {
                        SettingsError::invalid(name, value, e.to_string())
                    })?
            }
            WEEK_START => match value.parse::<Weekday>() {
                Ok(day @ (Weekday::Sun | Weekday::Mon)) => self.week_start = day,
                _ => return Err(SettingsError::invalid(name, value, "expected sun or mon")),
            },
            SNAP_MINUTES => match value.parse::<u32>() {
                Ok(minutes) if (1..=60).contains(&minutes) => self.snap_minutes = minutes,
                _ => return Err(SettingsError::invalid(name, value, "expected 1 to 60 minutes")),
            },
            SUBMIT_DELAY_MS => {
                self.submit_delay_ms = value
                    .parse()
                    .map_err(|_| SettingsError::invalid(name, value, "expected milliseconds"))?
            }
            _ => return Err(SettingsError::UnknownKey(name.to_string())),
        }
        Ok(())
    }

    /// `(name, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (PAGE_SIZE, self.page_size.to_string()),
            (DEFAULT_VIEW, self.default_view.to_string()),
            (WEEK_START, self.week_start.to_string()),
            (SNAP_MINUTES, self.snap_minutes.to_string()),
            (SUBMIT_DELAY_MS, self.submit_delay_ms.to_string()),
        ]
    }
}

fn key(name: &str) -> String {
    format!("{}{}", PREFIX, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_defaults_then_saved_values() {
        let provider = SettingsProvider::in_memory();
        assert_eq!(
            DashboardSettings::load(&provider).await.unwrap(),
            DashboardSettings::default()
        );

        let mut changed = DashboardSettings::default();
        changed.set("week_start", "mon").unwrap();
        changed.set("default_view", "month").unwrap();
        changed.save(&provider).await.unwrap();

        let loaded = DashboardSettings::load(&provider).await.unwrap();
        assert_eq!(loaded.week_start, Weekday::Mon);
        assert_eq!(loaded.default_view, CalendarView::Month);
        assert_eq!(provider.keys_with_prefix(PREFIX).await.unwrap().len(), KEYS.len());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = DashboardSettings::default();

        assert!(matches!(
            settings.set("page_size", "0"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(settings.set("week_start", "wed").is_err());
        assert!(settings.set("snap_minutes", "90").is_err());
        assert!(matches!(
            settings.set("theme", "dark"),
            Err(SettingsError::UnknownKey(k)) if k == "theme"
        ));
        assert_eq!(settings, DashboardSettings::default());
    }
}
