use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// After every tick or terminal event.
    #[default]
    OnDirty,
    /// After a tick or terminal event, at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Produces ticks, render requests and terminal events in order.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(now: Instant) -> Self {
        let long_ago = now.checked_sub(Duration::from_secs(3600)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: long_ago,
            last_render: long_ago,
            // The first frame must be drawn before any input arrives.
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }
            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns a tick or render event if one is due at `now`. Ticks win.
    fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }

        let render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// How long to wait for terminal input before something else is due.
    ///
    /// `None` means wait indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let deadline = [next_tick, next_render].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(10);

    #[test]
    fn test_initial_render_without_ticks() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        assert!(events.due(start).is_some_and(|e| e.is_render()));
        assert!(events.due(start).is_none());
        assert_eq!(events.timeout(start), None);
    }

    #[test]
    fn test_tick_then_render() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(TICK));

        assert!(events.due(start).is_some_and(|e| e.is_tick()));
        assert!(events.due(start).is_some_and(|e| e.is_render()));
        assert!(events.due(start).is_none());
        assert_eq!(events.timeout(start), Some(TICK));

        let later = start + TICK;
        assert!(events.due(later).is_some_and(|e| e.is_tick()));
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_render_mode(RenderMode::Throttled(TICK));

        assert!(events.due(start).is_some_and(|e| e.is_render()));
        events.dirty = true;
        assert!(events.due(start + TICK / 2).is_none());
        assert_eq!(events.timeout(start + TICK / 2), Some(TICK / 2));
        assert!(events.due(start + TICK).is_some_and(|e| e.is_render()));
    }
}
