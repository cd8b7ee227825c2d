use std::time::Duration;

use serde::Deserialize;

/// TfL StopPoint arrivals endpoint.
pub const DEFAULT_API_BASE: &str =
    "https://api.tfl.gov.uk/StopPoint/{atcocode}/arrivals?app_id={app_id}&app_key={app_key}";

/// How the outbound request URL is assembled from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlMode {
    /// Substitute placeholders inside `api_base`.
    #[default]
    Templated,
    /// Append `app_id`, `app_key`, `limit`, `group` and `nextbuses` as query parameters.
    QueryParams,
}

/// Board options, fixed once the board has started.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub atcocode: String,
    pub app_id: String,
    pub app_key: String,
    pub api_base: String,
    pub url_mode: UrlMode,
    pub update_interval_ms: u64,
    pub initial_load_delay_ms: i64,
    pub animation_speed_ms: u64,
    pub limit: usize,
    pub group: bool,
    pub next_buses: bool,
    pub fade: bool,
    pub fade_point: f64,
    pub show_real_time: bool,
    pub show_delay: bool,
    pub show_bearing: bool,
    pub max_delay_minutes: i64,
    pub debug: bool,
    pub locale: String,
    pub header: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            atcocode: String::new(),
            app_id: String::new(),
            app_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            url_mode: UrlMode::Templated,
            update_interval_ms: 5 * 60 * 1000,
            initial_load_delay_ms: 0,
            animation_speed_ms: 2000,
            limit: 50,
            group: false,
            next_buses: false,
            fade: true,
            fade_point: 0.25,
            show_real_time: false,
            show_delay: false,
            show_bearing: false,
            max_delay_minutes: -60,
            debug: false,
            locale: "en".to_string(),
            header: None,
        }
    }
}

/// First required setting that is still empty, in the order the board checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSetting {
    StopId,
    AppId,
    AppKey,
}

impl BoardConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn animation_speed(&self) -> Duration {
        Duration::from_millis(self.animation_speed_ms)
    }

    /// Fade start as a fraction of the list, never below zero.
    pub fn fade_point(&self) -> f64 {
        if self.fade_point.is_nan() {
            return 0.0;
        }
        self.fade_point.max(0.0)
    }

    pub fn effective_limit(&self) -> usize {
        self.limit.max(1)
    }

    pub fn missing_setting(&self) -> Option<MissingSetting> {
        if self.atcocode.is_empty() {
            Some(MissingSetting::StopId)
        } else if self.app_id.is_empty() {
            Some(MissingSetting::AppId)
        } else if self.app_key.is_empty() {
            Some(MissingSetting::AppKey)
        } else {
            None
        }
    }
}
