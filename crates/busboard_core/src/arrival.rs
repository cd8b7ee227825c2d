use std::fmt;

use board_logging::board_warn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One upcoming departure as reported by the arrivals endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalRecord {
    pub line_name: String,
    pub destination_name: String,
    pub time_to_station: u32,
    #[serde(default)]
    pub station_name: Option<String>,
    /// Compass bearing of the stop in degrees, as sent upstream.
    #[serde(default)]
    pub bearing: Option<String>,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub expected_arrival: Option<String>,
}

impl ArrivalRecord {
    pub fn new(
        line_name: impl Into<String>,
        destination_name: impl Into<String>,
        time_to_station: u32,
    ) -> Self {
        Self {
            line_name: line_name.into(),
            destination_name: destination_name.into(),
            time_to_station,
            station_name: None,
            bearing: None,
            expected_arrival: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMessage {
    NoDataReturned,
    NoDeparturesScheduled,
}

impl SnapshotMessage {
    pub fn text(self) -> &'static str {
        match self {
            SnapshotMessage::NoDataReturned => "No data returned",
            SnapshotMessage::NoDeparturesScheduled => "No departures scheduled",
        }
    }
}

impl fmt::Display for SnapshotMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Result of one poll. Replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalSnapshot {
    pub timestamp: DateTime<Utc>,
    /// Upstream order, truncated to the limit. Sorting happens at render time.
    pub records: Vec<ArrivalRecord>,
    pub message: Option<SnapshotMessage>,
}

impl ArrivalSnapshot {
    /// Normalizes a raw arrivals payload.
    ///
    /// Anything other than a JSON array counts as "no data". Truncation keeps the
    /// first `limit` entries in the order they were received.
    pub fn from_payload(payload: Option<&Value>, limit: usize, timestamp: DateTime<Utc>) -> Self {
        let Some(Value::Array(items)) = payload else {
            return Self::empty(SnapshotMessage::NoDataReturned, timestamp);
        };
        if items.is_empty() {
            return Self::empty(SnapshotMessage::NoDeparturesScheduled, timestamp);
        }

        let records: Vec<ArrivalRecord> = items
            .iter()
            .take(limit)
            .enumerate()
            .filter_map(|(index, item)| decode_record(index, item))
            .collect();

        if records.is_empty() {
            return Self::empty(SnapshotMessage::NoDataReturned, timestamp);
        }

        Self {
            timestamp,
            records,
            message: None,
        }
    }

    fn empty(message: SnapshotMessage, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            records: Vec::new(),
            message: Some(message),
        }
    }
}

fn decode_record(index: usize, item: &Value) -> Option<ArrivalRecord> {
    match ArrivalRecord::deserialize(item) {
        Ok(record) => Some(record),
        Err(err) => {
            board_warn!("Skipping arrival #{} that failed to decode: {}", index, err);
            None
        }
    }
}
