use serde::Deserialize;

use crate::chart::{DatasetPoint, weekly_dataset};
use crate::error::ConfigError;

pub const DEFAULT_REPLY_DELAY_MS: u64 = 500;
pub const DEFAULT_ESCALATION_DELAY_MS: u64 = 1_000;
pub const DEFAULT_BANNER_HIDE_DELAY_MS: u64 = 5_000;

/// Host-tunable timings and chart data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub reply_delay_ms: u64,
    pub escalation_delay_ms: u64,
    pub banner_hide_delay_ms: u64,
    pub weekly_dataset: Vec<DatasetPoint>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            escalation_delay_ms: DEFAULT_ESCALATION_DELAY_MS,
            banner_hide_delay_ms: DEFAULT_BANNER_HIDE_DELAY_MS,
            weekly_dataset: weekly_dataset(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WidgetConfigOverrides {
    reply_delay_ms: Option<u64>,
    escalation_delay_ms: Option<u64>,
    banner_hide_delay_ms: Option<u64>,
    weekly_dataset: Option<Vec<DatasetPoint>>,
}

impl WidgetConfig {
    /// Applies a JSON object of camelCase overrides on top of `self`. Blank
    /// input leaves the config unchanged.
    pub fn with_overrides_json(mut self, raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(self);
        }
        let overrides: WidgetConfigOverrides = serde_json::from_str(raw)
            .map_err(|error| ConfigError::InvalidOverrides(error.to_string()))?;

        if let Some(value) = overrides.reply_delay_ms {
            self.reply_delay_ms = value;
        }
        if let Some(value) = overrides.escalation_delay_ms {
            self.escalation_delay_ms = value;
        }
        if let Some(value) = overrides.banner_hide_delay_ms {
            self.banner_hide_delay_ms = value;
        }
        if let Some(dataset) = overrides.weekly_dataset {
            if dataset.is_empty() {
                return Err(ConfigError::InvalidOverrides(
                    "weeklyDataset must contain at least one point".to_string(),
                ));
            }
            self.weekly_dataset = dataset;
        }
        Ok(self)
    }
}
