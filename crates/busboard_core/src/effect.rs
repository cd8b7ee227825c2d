use std::time::Duration;

use crate::TimerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ArmTimer { timer_id: TimerId, delay: Duration },
    CancelTimer { timer_id: TimerId },
    FetchArrivals { url: String },
    Render { animation_speed: Duration },
}
