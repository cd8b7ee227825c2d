use board_logging::board_debug;

use crate::{BoardState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BoardState, msg: Msg) -> (BoardState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => state.start(),
        Msg::TimerFired { timer_id } => {
            if !state.fire_timer(timer_id) {
                board_debug!("Ignoring stale timer {}", timer_id);
                return (state, Vec::new());
            }
            let mut effects = state.trigger_poll();
            let interval = state.config().update_interval();
            effects.extend(state.reschedule(interval));
            effects
        }
        Msg::ArrivalsReceived {
            url,
            payload,
            received_at,
        } => {
            if state.request_url() != Some(url.as_str()) {
                board_debug!("Ignoring response for foreign url {}", url);
                return (state, Vec::new());
            }
            let mut effects = state.process_buses(payload.as_ref(), received_at);
            let interval = state.config().update_interval();
            effects.extend(state.reschedule(interval));
            effects
        }
        Msg::VisibilityChanged { visible } => {
            state.set_visible(visible);
            Vec::new()
        }
        Msg::Stopped => state.stop(),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
