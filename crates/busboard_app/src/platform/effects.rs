use std::io;
use std::sync::mpsc;
use std::thread;

use board_logging::{advance_poll_cycle, board_debug, board_info, board_warn};
use busboard_core::{Effect, Msg};
use busboard_engine::{EngineEvent, EngineHandle, FetchSettings};
use chrono::{DateTime, Utc};

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, msg_tx: mpsc::Sender<Msg>) -> io::Result<Self> {
        let (engine, events) = EngineHandle::new(settings)?;
        spawn_event_loop(events, msg_tx)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::ArmTimer { timer_id, delay } => {
                board_debug!("ArmTimer timer_id={} delay={:?}", timer_id, delay);
                self.engine.arm_timer(timer_id, delay);
            }
            Effect::CancelTimer { timer_id } => {
                board_debug!("CancelTimer timer_id={}", timer_id);
                self.engine.cancel_timer(timer_id);
            }
            Effect::FetchArrivals { url } => {
                advance_poll_cycle();
                board_info!("Requesting arrivals url_len={}", url.len());
                self.engine.fetch(url);
            }
            Effect::Render { .. } => {
                // drawn by the app loop
            }
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.engine.shutdown();
    }
}

fn spawn_event_loop(
    events: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Msg>,
) -> io::Result<()> {
    thread::Builder::new()
        .name("busboard-events".to_string())
        .spawn(move || {
            while let Ok(event) = events.recv() {
                if msg_tx.send(event_to_msg(event, Utc::now())).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

/// Transport failures degrade to "no payload"; the board shows them as missing data.
pub(crate) fn event_to_msg(event: EngineEvent, received_at: DateTime<Utc>) -> Msg {
    match event {
        EngineEvent::TimerFired { timer_id } => Msg::TimerFired { timer_id },
        EngineEvent::FetchCompleted { url, result } => {
            let payload = match result {
                Ok(value) => Some(value),
                Err(err) => {
                    board_warn!("Arrivals request failed: {}", err);
                    None
                }
            };
            Msg::ArrivalsReceived {
                url,
                payload,
                received_at,
            }
        }
    }
}
