use chrono::DateTime;

use crate::{ArrivalRecord, ArrivalSnapshot, BoardConfig, MissingSetting, TimeLabels};

const LATE_BELOW_SECS: u32 = 2 * 60;
const SOON_BELOW_SECS: u32 = 5 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardViewModel {
    pub header: Option<String>,
    pub body: BoardBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardBody {
    Placeholder(Placeholder),
    Departures(Vec<ViewRow>),
    /// Single informational row, shown when the snapshot holds no records.
    Notice(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    MissingStopId,
    MissingAppId,
    MissingAppKey,
    Loading,
}

impl Placeholder {
    pub fn text(self) -> &'static str {
        match self {
            Placeholder::MissingStopId => "Please set the ATCO code.",
            Placeholder::MissingAppId => "Please set the application ID.",
            Placeholder::MissingAppKey => "Please set the application key.",
            Placeholder::Loading => "Loading bus Info ...",
        }
    }
}

impl From<MissingSetting> for Placeholder {
    fn from(missing: MissingSetting) -> Self {
        match missing {
            MissingSetting::StopId => Placeholder::MissingStopId,
            MissingSetting::AppId => Placeholder::MissingAppId,
            MissingSetting::AppKey => Placeholder::MissingAppKey,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    #[default]
    Normal,
    Soon,
    Late,
}

impl Urgency {
    pub fn from_seconds(seconds_to_arrival: u32) -> Self {
        if seconds_to_arrival < LATE_BELOW_SECS {
            Urgency::Late
        } else if seconds_to_arrival < SOON_BELOW_SECS {
            Urgency::Soon
        } else {
            Urgency::Normal
        }
    }

    /// Style class carried by the time cell, if any.
    pub fn class(self) -> Option<&'static str> {
        match self {
            Urgency::Normal => None,
            Urgency::Soon => Some("soon"),
            Urgency::Late => Some("late"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub route: String,
    pub destination: String,
    pub time_label: String,
    pub seconds_to_arrival: u32,
    pub urgency: Urgency,
    /// 1.0 is fully visible.
    pub opacity: f64,
}

/// Projects the configuration and the latest snapshot into something drawable.
///
/// Guards run in a fixed order: stop id, app id, app key, then loading.
pub fn render(config: &BoardConfig, snapshot: Option<&ArrivalSnapshot>) -> BoardViewModel {
    let header = header_text(config, snapshot);

    if let Some(missing) = config.missing_setting() {
        return BoardViewModel {
            header,
            body: BoardBody::Placeholder(missing.into()),
        };
    }

    let Some(snapshot) = snapshot else {
        return BoardViewModel {
            header,
            body: BoardBody::Placeholder(Placeholder::Loading),
        };
    };

    if snapshot.records.is_empty() {
        let notice = snapshot
            .message
            .map(|message| message.text().to_string())
            .unwrap_or_default();
        return BoardViewModel {
            header,
            body: BoardBody::Notice(notice),
        };
    }

    let mut ordered: Vec<&ArrivalRecord> = snapshot.records.iter().collect();
    // Stable: equal countdowns keep their upstream order.
    ordered.sort_by_key(|record| record.time_to_station);

    let labels = TimeLabels::for_locale(&config.locale);
    let opacities = fade_opacities(ordered.len(), config);
    let rows = ordered
        .into_iter()
        .zip(opacities)
        .map(|(record, opacity)| ViewRow {
            route: record.line_name.clone(),
            destination: record.destination_name.clone(),
            time_label: row_time_label(record, config, labels),
            seconds_to_arrival: record.time_to_station,
            urgency: Urgency::from_seconds(record.time_to_station),
            opacity,
        })
        .collect();

    BoardViewModel {
        header,
        body: BoardBody::Departures(rows),
    }
}

/// `"Due"` under a minute, otherwise whole minutes rounded down.
pub fn time_label(seconds_to_arrival: u32, labels: TimeLabels) -> String {
    match seconds_to_arrival / 60 {
        0 => labels.due.to_string(),
        minutes => format!("{minutes} {}", labels.minutes),
    }
}

fn row_time_label(record: &ArrivalRecord, config: &BoardConfig, labels: TimeLabels) -> String {
    let label = time_label(record.time_to_station, labels);
    if !config.show_real_time {
        return label;
    }
    match record
        .expected_arrival
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    {
        Some(expected) => format!("{label} ({})", expected.format("%H:%M")),
        None => label,
    }
}

/// Opacity per row, fading linearly from the fade point to the end of the list.
pub fn fade_opacities(total_rows: usize, config: &BoardConfig) -> Vec<f64> {
    let fade_point = config.fade_point();
    if !config.fade || fade_point >= 1.0 {
        return vec![1.0; total_rows];
    }

    let starting_index = (total_rows as f64 * fade_point).floor() as usize;
    let steps = total_rows.saturating_sub(starting_index) as f64;
    (0..total_rows)
        .map(|index| {
            if index < starting_index {
                1.0
            } else {
                let current_step = (index - starting_index) as f64;
                1.0 - current_step / steps
            }
        })
        .collect()
}

/// Eight-point compass direction for a bearing in degrees.
pub fn compass_point(bearing_degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let normalized = bearing_degrees.rem_euclid(360.0);
    let sector = ((normalized + 22.5) / 45.0).floor() as usize % POINTS.len();
    POINTS[sector]
}

fn header_text(config: &BoardConfig, snapshot: Option<&ArrivalSnapshot>) -> Option<String> {
    let first = snapshot.and_then(|snapshot| snapshot.records.first());
    let base = config
        .header
        .clone()
        .or_else(|| first.and_then(|record| record.station_name.clone()))?;

    if !config.show_bearing {
        return Some(base);
    }
    let bearing = first
        .and_then(|record| record.bearing.as_deref())
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|degrees| degrees.is_finite());
    match bearing {
        Some(degrees) => Some(format!("{base} ({})", compass_point(degrees))),
        None => Some(base),
    }
}

#[cfg(test)]
mod tests {
    use super::{compass_point, fade_opacities, time_label, Urgency};
    use crate::{BoardConfig, TimeLabels};

    #[test]
    fn time_label_floors_to_minutes() {
        let labels = TimeLabels::default();
        assert_eq!(time_label(0, labels), "Due");
        assert_eq!(time_label(59, labels), "Due");
        assert_eq!(time_label(60, labels), "1 min");
        assert_eq!(time_label(119, labels), "1 min");
        assert_eq!(time_label(538, labels), "8 min");
    }

    #[test]
    fn late_wins_over_soon() {
        assert_eq!(Urgency::from_seconds(0), Urgency::Late);
        assert_eq!(Urgency::from_seconds(119), Urgency::Late);
        assert_eq!(Urgency::from_seconds(120), Urgency::Soon);
        assert_eq!(Urgency::from_seconds(299), Urgency::Soon);
        assert_eq!(Urgency::from_seconds(300), Urgency::Normal);
        assert_eq!(Urgency::from_seconds(300).class(), None);
    }

    #[test]
    fn fade_ramp_starts_at_fade_point() {
        let config = BoardConfig::default();
        let opacities = fade_opacities(8, &config);
        assert_eq!(opacities.len(), 8);
        assert_eq!(opacities[0], 1.0);
        assert_eq!(opacities[1], 1.0);
        assert_eq!(opacities[2], 1.0);
        assert!((opacities[7] - (1.0 - 5.0 / 6.0)).abs() < 1e-9);
        assert!(opacities.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn fade_disabled_or_point_at_one_keeps_full_opacity() {
        let disabled = BoardConfig {
            fade: false,
            ..BoardConfig::default()
        };
        assert!(fade_opacities(5, &disabled).iter().all(|o| *o == 1.0));

        let at_end = BoardConfig {
            fade_point: 1.0,
            ..BoardConfig::default()
        };
        assert!(fade_opacities(5, &at_end).iter().all(|o| *o == 1.0));
    }

    #[test]
    fn negative_fade_point_fades_from_first_row() {
        let config = BoardConfig {
            fade_point: -3.0,
            ..BoardConfig::default()
        };
        let opacities = fade_opacities(4, &config);
        assert_eq!(opacities, vec![1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn compass_points_wrap_around_north() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(350.0), "N");
        assert_eq!(compass_point(225.0), "SW");
        assert_eq!(compass_point(-90.0), "W");
        assert_eq!(compass_point(100.0), "E");
    }
}
