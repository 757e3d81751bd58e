use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::DefaultTerminal;

use super::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Owns the terminal and the event loop while an [`App`] runs.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    mouse_capture: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(Instant::now()),
            mouse_capture: false,
        }
    }

    /// Sets the tick rate in Hz. `None` disables ticks.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.events
            .set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Requests mouse events. Takes effect when [`Self::run`] starts.
    pub fn enable_mouse_capture(&mut self) {
        self.mouse_capture = true;
    }

    /// Runs `app` until [`App::should_exit`] returns true.
    ///
    /// The terminal is restored on return, including after an error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            if self.mouse_capture {
                crossterm::execute!(io::stdout(), EnableMouseCapture)?;
            }
            let result = self.event_loop(terminal, app);
            if self.mouse_capture {
                crossterm::execute!(io::stdout(), DisableMouseCapture)?;
            }
            result
        })
    }

    fn event_loop<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick => app.update(self),
                TuiEvent::Render => {
                    terminal.draw(|frame| app.draw(frame))?;
                }
                TuiEvent::Crossterm(event) => app.handle_event(self, event),
            }
        }
        Ok(())
    }
}
