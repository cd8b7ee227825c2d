//! Busboard core: pure state machine, arrival normalization and view-model helpers.
mod arrival;
mod config;
mod effect;
mod locale;
mod msg;
mod request;
mod scheduler;
mod state;
mod update;
mod view_model;

pub use arrival::{ArrivalRecord, ArrivalSnapshot, SnapshotMessage};
pub use config::{BoardConfig, MissingSetting, UrlMode, DEFAULT_API_BASE};
pub use effect::Effect;
pub use locale::TimeLabels;
pub use msg::Msg;
pub use request::{build_request_url, RequestUrlError};
pub use scheduler::{Scheduler, TimerId};
pub use state::BoardState;
pub use update::update;
pub use view_model::{
    compass_point, fade_opacities, render, time_label, BoardBody, BoardViewModel, Placeholder,
    Urgency, ViewRow,
};
