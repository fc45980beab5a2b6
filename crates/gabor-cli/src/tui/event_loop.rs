use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Produces ticks, redraw requests and terminal input in order.
///
/// Ticks fire every `tick_interval` while one is set. A redraw is requested
/// whenever something happened since the last one, but no more often than
/// `render_interval`.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_interval: Duration,
    last_tick: Instant,
    last_render: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            render_interval: Duration::ZERO,
            last_tick: Instant::now(),
            last_render: None,
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    pub(super) fn set_render_interval(&mut self, interval: Duration) {
        self.render_interval = interval;
    }

    /// Blocks until the next event is due.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            let next_tick = self.next_tick_at();
            if next_tick.is_some_and(|at| at <= now) {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            let next_render = self.next_render_at(now);
            if next_render.is_some_and(|at| at <= now) {
                self.last_render = Some(now);
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let deadline = [next_tick, next_render].into_iter().flatten().min();
            if let Some(deadline) = deadline
                && !event::poll(deadline.saturating_duration_since(now))?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn next_tick_at(&self) -> Option<Instant> {
        self.tick_interval.map(|interval| self.last_tick + interval)
    }

    fn next_render_at(&self, now: Instant) -> Option<Instant> {
        self.dirty.then(|| {
            self.last_render
                .map_or(now, |last| last + self.render_interval)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_render_is_due_immediately() {
        let events = EventLoop::new();
        let now = Instant::now();
        assert_eq!(events.next_render_at(now), Some(now));
        assert_eq!(events.next_tick_at(), None);
    }

    #[test]
    fn test_render_is_throttled() {
        let mut events = EventLoop::new();
        events.set_render_interval(Duration::from_millis(50));
        let now = Instant::now();
        events.last_render = Some(now);

        events.dirty = false;
        assert_eq!(events.next_render_at(now), None);

        events.dirty = true;
        assert_eq!(
            events.next_render_at(now),
            Some(now + Duration::from_millis(50))
        );
    }

    #[test]
    fn test_tick_interval() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(20)));
        let start = events.last_tick;
        assert_eq!(events.next_tick_at(), Some(start + Duration::from_millis(20)));

        events.set_tick_interval(None);
        assert_eq!(events.next_tick_at(), None);
    }
}
