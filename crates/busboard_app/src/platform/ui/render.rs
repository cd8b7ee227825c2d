use busboard_core::{BoardBody, BoardViewModel, Urgency, ViewRow};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Darkens towards black; the terminal background stands in for transparency.
    pub fn faded(self, opacity: f64) -> Self {
        let opacity = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let scale = |channel: u8| (f64::from(channel) * opacity).round() as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    ClearScreen,
    Line { text: String, color: Rgb },
}

pub fn render(view: &BoardViewModel) -> Vec<DrawCommand> {
    let mut cmds = vec![DrawCommand::ClearScreen];

    if let Some(header) = &view.header {
        cmds.push(DrawCommand::Line {
            text: header.clone(),
            color: HEADER,
        });
    }

    match &view.body {
        BoardBody::Placeholder(placeholder) => cmds.push(DrawCommand::Line {
            text: placeholder.text().to_string(),
            color: DIMMED,
        }),
        BoardBody::Notice(message) => cmds.push(DrawCommand::Line {
            text: format!(" {message} "),
            color: BRIGHT,
        }),
        BoardBody::Departures(rows) => {
            cmds.extend(rows.iter().map(|row| DrawCommand::Line {
                text: format_row(row),
                color: row_color(row),
            }));
        }
    }

    cmds
}

fn row_color(row: &ViewRow) -> Rgb {
    let base = match row.urgency {
        Urgency::Late => LATE,
        Urgency::Soon => SOON,
        Urgency::Normal => BRIGHT,
    };
    base.faded(row.opacity)
}

fn format_row(row: &ViewRow) -> String {
    format!(
        " {route:<rw$} {dest:<dw$} {time:>tw$}",
        route = fit(&row.route, ROUTE_WIDTH),
        dest = fit(&row.destination, DESTINATION_WIDTH),
        time = fit(&row.time_label, TIME_WIDTH),
        rw = ROUTE_WIDTH,
        dw = DESTINATION_WIDTH,
        tw = TIME_WIDTH,
    )
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use busboard_core::{BoardBody, BoardViewModel, Placeholder, Urgency, ViewRow};

    use super::{fit, render, DrawCommand, Rgb};
    use crate::platform::ui::constants::{BRIGHT, DIMMED, LATE};

    fn row(route: &str, destination: &str, urgency: Urgency, opacity: f64) -> ViewRow {
        ViewRow {
            route: route.into(),
            destination: destination.into(),
            time_label: "1 min".into(),
            seconds_to_arrival: 90,
            urgency,
            opacity,
        }
    }

    #[test]
    fn placeholder_is_dimmed() {
        let view = BoardViewModel {
            header: None,
            body: BoardBody::Placeholder(Placeholder::Loading),
        };
        assert_eq!(
            render(&view),
            vec![
                DrawCommand::ClearScreen,
                DrawCommand::Line {
                    text: "Loading bus Info ...".into(),
                    color: DIMMED,
                },
            ]
        );
    }

    #[test]
    fn notice_is_bright() {
        let view = BoardViewModel {
            header: None,
            body: BoardBody::Notice("No departures scheduled".into()),
        };
        assert_eq!(
            render(&view),
            vec![
                DrawCommand::ClearScreen,
                DrawCommand::Line {
                    text: " No departures scheduled ".into(),
                    color: BRIGHT,
                },
            ]
        );
    }

    #[test]
    fn rows_follow_header_with_urgency_colors() {
        let view = BoardViewModel {
            header: Some("Surbiton Station".into()),
            body: BoardBody::Departures(vec![
                row("71", "Chessington", Urgency::Late, 1.0),
                row("K2", "Kingston Hospital", Urgency::Normal, 0.5),
            ]),
        };
        let cmds = render(&view);
        assert_eq!(cmds.len(), 4);
        match &cmds[2] {
            DrawCommand::Line { text, color } => {
                assert!(text.starts_with(" 71     Chessington"));
                assert!(text.ends_with("1 min"));
                assert_eq!(*color, LATE);
            }
            other => panic!("unexpected command {other:?}"),
        }
        match &cmds[3] {
            DrawCommand::Line { color, .. } => assert_eq!(*color, Rgb(118, 118, 118)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn long_text_is_clipped() {
        assert_eq!(fit("Kingston Hospital", 8), "Kingsto…");
        assert_eq!(fit("K2", 8), "K2");
    }

    #[test]
    fn fading_clamps_opacity() {
        assert_eq!(Rgb(200, 100, 0).faded(2.0), Rgb(200, 100, 0));
        assert_eq!(Rgb(200, 100, 0).faded(-1.0), Rgb(0, 0, 0));
        assert_eq!(Rgb(200, 100, 0).faded(0.5), Rgb(100, 50, 0));
    }
}
