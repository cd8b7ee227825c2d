//! Busboard engine: timers, arrivals transport and effect execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_json, DecodeError};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, TimerId};
