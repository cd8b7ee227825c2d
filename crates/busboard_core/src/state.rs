use std::time::Duration;

use board_logging::{board_debug, board_info, board_warn};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::view_model::{render, BoardViewModel};
use crate::{build_request_url, ArrivalSnapshot, BoardConfig, Effect, Scheduler};

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    config: BoardConfig,
    scheduler: Scheduler,
    request_url: Option<String>,
    snapshot: Option<ArrivalSnapshot>,
    visible: bool,
    dirty: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl BoardState {
    pub fn new(config: BoardConfig) -> Self {
        let scheduler = Scheduler::new(config.update_interval());
        Self {
            config,
            scheduler,
            request_url: None,
            snapshot: None,
            visible: true,
            dirty: false,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Option<&ArrivalSnapshot> {
        self.snapshot.as_ref()
    }

    /// Last URL handed to the transport; responses for any other URL are ignored.
    pub fn request_url(&self) -> Option<&str> {
        self.request_url.as_deref()
    }

    /// True once the first snapshot, successful or empty, has arrived.
    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn header(&self) -> Option<String> {
        render(&self.config, self.snapshot.as_ref()).header
    }

    /// Renders the current snapshot, dumping it first when `debug` is on.
    pub fn view(&self) -> BoardViewModel {
        if let Some(dump) = self.debug_dump() {
            board_info!("{}", dump);
        }
        render(&self.config, self.snapshot.as_ref())
    }

    fn debug_dump(&self) -> Option<String> {
        self.config
            .debug
            .then(|| format!("Current arrivals: {:?}", self.snapshot))
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Resolves the request URL and arms the first timer.
    pub fn start(&mut self) -> Vec<Effect> {
        self.request_url = match build_request_url(&self.config) {
            Ok(url) => Some(url),
            Err(err) => {
                board_warn!("Arrivals requests disabled: {}", err);
                None
            }
        };
        board_info!(
            "Starting board for stop {:?}, refresh every {:?}",
            self.config.atcocode,
            self.config.update_interval()
        );

        let mut effects = self
            .scheduler
            .start(Some(self.config.initial_load_delay_ms));
        effects.push(self.render_effect());
        self.dirty = true;
        effects
    }

    pub fn reschedule(&mut self, delay: Duration) -> Vec<Effect> {
        self.scheduler.reschedule(delay)
    }

    /// Emits exactly one arrivals request, unless the host has hidden the board
    /// or a required setting is still empty.
    pub fn trigger_poll(&self) -> Vec<Effect> {
        if !self.visible {
            board_debug!("Board hidden; skipping arrivals request");
            return Vec::new();
        }
        if let Some(missing) = self.config.missing_setting() {
            board_debug!("Setting {:?} is empty; skipping arrivals request", missing);
            return Vec::new();
        }
        match &self.request_url {
            Some(url) => vec![Effect::FetchArrivals { url: url.clone() }],
            None => {
                board_warn!("No usable request url; skipping arrivals request");
                Vec::new()
            }
        }
    }

    /// Replaces the snapshot with the normalized payload and asks for a render.
    pub fn process_buses(&mut self, payload: Option<&Value>, now: DateTime<Utc>) -> Vec<Effect> {
        let snapshot =
            ArrivalSnapshot::from_payload(payload, self.config.effective_limit(), now);
        self.snapshot = Some(snapshot);
        self.dirty = true;
        vec![self.render_effect()]
    }

    pub(crate) fn stop(&mut self) -> Vec<Effect> {
        self.scheduler.cancel()
    }

    pub(crate) fn fire_timer(&mut self, timer_id: crate::TimerId) -> bool {
        self.scheduler.fire(timer_id)
    }

    fn render_effect(&self) -> Effect {
        Effect::Render {
            animation_speed: self.config.animation_speed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::BoardState;
    use crate::BoardConfig;

    fn with_debug(debug: bool) -> BoardState {
        BoardState::new(BoardConfig {
            atcocode: "490008660N".into(),
            app_id: "id".into(),
            app_key: "key".into(),
            debug,
            ..BoardConfig::default()
        })
    }

    #[test]
    fn debug_dump_shows_degraded_snapshot() {
        let mut state = with_debug(true);
        state.process_buses(Some(&json!({ "error": true })), Utc::now());
        let dump = state.debug_dump().unwrap();
        assert!(dump.starts_with("Current arrivals: Some("));
        assert!(dump.contains("NoDataReturned"));
    }

    #[test]
    fn debug_dump_is_off_by_default() {
        let mut state = with_debug(false);
        state.process_buses(Some(&json!([])), Utc::now());
        assert_eq!(state.debug_dump(), None);
    }
}
