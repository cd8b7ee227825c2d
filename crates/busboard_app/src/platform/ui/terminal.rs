use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::render::{DrawCommand, Rgb};

/// Executes draw commands against a terminal-like writer.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn draw(&mut self, commands: &[DrawCommand]) -> io::Result<()> {
        for command in commands {
            match command {
                DrawCommand::ClearScreen => {
                    queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
                }
                DrawCommand::Line { text, color } => {
                    queue!(
                        self.out,
                        SetForegroundColor(to_color(*color)),
                        Print(text),
                        ResetColor,
                        Print("\r\n")
                    )?;
                }
            }
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::TerminalSurface;
    use crate::platform::ui::render::{DrawCommand, Rgb};

    #[test]
    fn lines_are_written_in_order() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface
            .draw(&[
                DrawCommand::ClearScreen,
                DrawCommand::Line {
                    text: "Surbiton Station".into(),
                    color: Rgb(255, 255, 255),
                },
                DrawCommand::Line {
                    text: " No departures scheduled ".into(),
                    color: Rgb(235, 235, 235),
                },
            ])
            .unwrap();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        let header = output.find("Surbiton Station").unwrap();
        let notice = output.find("No departures scheduled").unwrap();
        assert!(header < notice);
        assert!(output.contains("\u{1b}[38;2;255;255;255m"));
    }
}
