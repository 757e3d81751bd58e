use crossterm::event::Event;
use ratatui::Frame;
use tilecrush_engine::GameSession;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, RenderMode, Runtime},
};

const FPS: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            screen: PlayScreen::new(session),
        }
    }

    pub fn session(&self) -> &GameSession {
        self.screen.session()
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(FPS));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        runtime.enable_mouse_capture();
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.screen.update();
    }
}
