use bees_core::Region;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Default quiescence window for resize events.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;

/// Region applied when a metric is picked and no region was selected yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultRegion {
    /// Leave the heat map empty until a region is clicked.
    #[default]
    None,
    UnitedStates,
    State(String),
}

impl DefaultRegion {
    pub fn region(&self) -> Option<Region> {
        match self {
            DefaultRegion::None => None,
            DefaultRegion::UnitedStates => Some(Region::UnitedStates),
            DefaultRegion::State(name) => Some(Region::from_name(name)),
        }
    }
}

impl FromStr for DefaultRegion {
    type Err = std::convert::Infallible;

    /// `none`, `us` / `united_states`, or a state name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_lowercase().as_str() {
            "" | "none" => DefaultRegion::None,
            "us" | "usa" | "united_states" | "united states" => DefaultRegion::UnitedStates,
            _ => DefaultRegion::State(s.to_string()),
        })
    }
}

/// Dashboard defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_region: DefaultRegion,
    /// Metric selected at startup, `None` to start with nothing selected.
    pub initial_metric: Option<String>,
    pub resize_debounce_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_region: DefaultRegion::None,
            initial_metric: None,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_with_nothing_selected() {
        let config = DashboardConfig::default();
        assert_eq!(config.default_region.region(), None);
        assert_eq!(config.initial_metric, None);
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(r#"{"default_region": {"state": "California"}}"#)
            .unwrap();
        assert_eq!(
            config.default_region.region(),
            Some(Region::from_name("California"))
        );
        assert_eq!(config.resize_debounce_ms, DEFAULT_RESIZE_DEBOUNCE_MS);

        let config = DashboardConfig::from_json(
            r#"{"default_region": "united_states", "initial_metric": "num_colonies", "resize_debounce_ms": 100}"#,
        )
        .unwrap();
        assert_eq!(config.default_region, DefaultRegion::UnitedStates);
        assert_eq!(config.initial_metric.as_deref(), Some("num_colonies"));
        assert_eq!(config.resize_debounce(), Duration::from_millis(100));
    }

    #[test]
    fn default_region_from_str() {
        assert_eq!("none".parse::<DefaultRegion>().unwrap(), DefaultRegion::None);
        assert_eq!("US".parse::<DefaultRegion>().unwrap(), DefaultRegion::UnitedStates);
        assert_eq!(
            "United States".parse::<DefaultRegion>().unwrap(),
            DefaultRegion::UnitedStates
        );
        assert_eq!(
            "California".parse::<DefaultRegion>().unwrap(),
            DefaultRegion::State("California".to_string())
        );
    }
}
