use std::sync::mpsc;

use anyhow::Context;
use board_logging::{board_debug, board_info};
use busboard_core::{update, BoardState, Effect, Msg};
use busboard_engine::FetchSettings;
use log::LevelFilter;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::settings;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let path = settings::config_path();
    let config = settings::load(&path)
        .with_context(|| format!("loading board settings from {}", path.display()))?;

    let level = if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(LogDestination::from_env(), level);
    board_info!("Loaded settings from {:?}", path);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner =
        EffectRunner::new(FetchSettings::default(), msg_tx.clone()).context("starting engine")?;
    let mut app = App {
        state: BoardState::new(config),
        runner,
        surface: ui::terminal::TerminalSurface::stdout(),
    };

    msg_tx.send(Msg::Started).context("queueing start message")?;
    while let Ok(msg) = msg_rx.recv() {
        app.dispatch(msg)?;
    }
    Ok(())
}

struct App {
    state: BoardState,
    runner: EffectRunner,
    surface: ui::terminal::TerminalSurface<std::io::Stdout>,
}

impl App {
    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in effects {
            match effect {
                Effect::Render { animation_speed } => {
                    if self.state.consume_dirty() {
                        board_debug!("Render (animation {:?})", animation_speed);
                        let view = self.state.view();
                        self.surface
                            .draw(&ui::render::render(&view))
                            .context("drawing board")?;
                    }
                }
                other => self.runner.run(other),
            }
        }
        Ok(())
    }
}
