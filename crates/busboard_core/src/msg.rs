use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Host finished mounting the board.
    Started,
    /// A timer armed through `Effect::ArmTimer` elapsed.
    TimerFired { timer_id: crate::TimerId },
    /// Transport answered a request. `payload` is `None` when nothing usable came back.
    ArrivalsReceived {
        url: String,
        payload: Option<Value>,
        received_at: DateTime<Utc>,
    },
    /// Host showed or hid the board.
    VisibilityChanged { visible: bool },
    /// Host is tearing the board down.
    Stopped,
    /// Fallback for placeholder wiring.
    NoOp,
}
