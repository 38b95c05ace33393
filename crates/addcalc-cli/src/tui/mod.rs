//! Terminal keypad frontend

mod app;
mod grid;
mod input;
mod render;

pub use app::App;
pub use grid::TextGrid;
pub use input::{InputHandler, TuiAction};
pub use render::render;

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use addcalc::service::HttpArithmetic;
use addcalc::session::Session;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

const FRAME: Duration = Duration::from_millis(50);

/// Raw-mode terminal, restored on drop
struct TerminalGuard<W: Write> {
    out: W,
    enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> CliResult<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| CliError::terminal(format!("cannot enter raw mode: {e}")))?;
        Self::take_over(out)
    }

    /// Sets up the screen once raw mode is on. Dropping the guard on any
    /// error below turns raw mode off again.
    fn take_over(out: W) -> CliResult<Self> {
        let mut guard = Self {
            out,
            enhanced: false,
        };
        execute!(guard.out, EnterAlternateScreen, Hide)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                guard.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.enhanced = true;
        }
        Ok(guard)
    }

    fn draw(&mut self, lines: &[String]) -> CliResult<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for (row, line) in (0u16..).zip(lines) {
            queue!(self.out, MoveTo(0, row), Print(line))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Runs the interactive keypad until the user quits
pub fn run(config: &CliConfig) -> CliResult<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let service = Arc::new(HttpArithmetic::from_config(&config.calc));
    let mut app = App::new(
        Session::new(config.calc.clone()),
        service,
        runtime.handle().clone(),
    );

    let mut term = TerminalGuard::enter(io::stdout())?;
    let handler = InputHandler::new(term.enhanced);
    tracing::info!(
        endpoint = %config.calc.endpoint,
        release_events = term.enhanced,
        "keypad started"
    );

    let mut last_frame: Vec<String> = Vec::new();
    while !app.should_quit() {
        app.poll_responses();
        app.tick(Instant::now());

        let frame = render(&app);
        if frame != last_frame {
            term.draw(&frame)?;
            last_frame = frame;
        }

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                let action = handler.handle_key(key, app.menu_open());
                app.handle(action, Instant::now());
            }
        }
    }
    Ok(())
}
