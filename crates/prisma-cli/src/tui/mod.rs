//! Interactive viewer: terminal setup, the event loop and drawing.

mod keymap;
mod render;
mod theme;

pub use keymap::KeyMap;

use crate::error::{CliError, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use keymap::Input;
use molprisma::engine::controller::{Action, Flow, ViewController};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use tracing::{debug, info};

/// Leaves raw mode and the alternate screen, ignoring failures. Safe to call
/// more than once.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().map_err(CliError::Terminal)?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            restore_terminal();
            return Err(CliError::Terminal(e));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// The viewer state the event loop mutates.
struct App {
    controller: ViewController,
    keymap: KeyMap,
    show_help: bool,
    viewport_height: usize,
}

impl App {
    fn new(controller: ViewController, keymap: KeyMap) -> Self {
        Self {
            controller,
            keymap,
            show_help: false,
            viewport_height: 1,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
        let page = self.controller.fast_scroll_step(self.viewport_height);
        let input = self.keymap.resolve(key, page);

        if self.show_help {
            self.show_help = false;
            return Ok(match input {
                Some(Input::Apply(Action::Quit)) => Flow::Quit,
                _ => Flow::Continue,
            });
        }

        match input {
            Some(Input::ToggleHelp) => {
                self.show_help = true;
                Ok(Flow::Continue)
            }
            Some(Input::Apply(action)) => {
                debug!(?action, "Applying action.");
                Ok(self.controller.apply(action)?)
            }
            None => Ok(Flow::Continue),
        }
    }
}

/// Runs the viewer until the user quits.
pub fn run(controller: ViewController, keymap: KeyMap) -> Result<()> {
    let mut app = App::new(controller, keymap);
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout())).map_err(CliError::Terminal)?;
    info!("Viewer started.");

    loop {
        terminal
            .draw(|frame| {
                app.viewport_height =
                    render::draw(frame, &app.controller, &app.keymap, app.show_help);
            })
            .map_err(CliError::Terminal)?;

        match event::read().map_err(CliError::Terminal)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key)? == Flow::Quit {
                    break;
                }
            }
            Event::Resize(..) => debug!("Terminal resized."),
            _ => {}
        }
    }

    info!("Viewer closed.");
    Ok(())
}
