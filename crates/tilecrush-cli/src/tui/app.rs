use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// An application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure tick rate, render mode
    /// and mouse capture here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles key, mouse and resize events.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the current state. Takes `&self`; record anything needed for
    /// hit-testing in interior-mutable fields.
    fn draw(&self, frame: &mut Frame);

    /// Advances time-based state by one tick.
    fn update(&mut self, runtime: &mut Runtime);
}
