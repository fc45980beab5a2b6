use std::{io, time::Duration};

use super::{ScreenStack, event::TuiEvent, event_loop::EventLoop};

/// Drives a [`ScreenStack`] on the terminal.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

fn interval_from_rate(rate: u64) -> Duration {
    Duration::from_nanos(1_000_000_000 / rate.max(1))
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many ticks per second the active screen receives.
    ///
    /// `None` stops ticking, for screens that only react to input.
    pub fn set_tick_rate(&mut self, rate: Option<u64>) {
        self.events.set_tick_interval(rate.map(interval_from_rate));
    }

    /// Caps the number of redraws per second.
    pub fn set_frame_rate(&mut self, rate: u64) {
        self.events.set_render_interval(interval_from_rate(rate));
    }

    /// Runs `stack` until its last screen is gone.
    ///
    /// Ticks go to [`ScreenStack::update`], redraws to
    /// [`ScreenStack::draw`] and terminal input to
    /// [`ScreenStack::handle_event`].
    pub fn run(mut self, stack: &mut ScreenStack) -> io::Result<()> {
        stack.init(&mut self);
        tracing::debug!(depth = stack.depth(), "terminal ui started");

        ratatui::run(|terminal| {
            while !stack.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => stack.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| stack.draw(frame))?;
                    }
                    TuiEvent::Terminal(event) => stack.handle_event(&mut self, &event),
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_rate() {
        assert_eq!(interval_from_rate(1), Duration::from_secs(1));
        assert_eq!(interval_from_rate(50), Duration::from_millis(20));
        assert_eq!(interval_from_rate(0), Duration::from_secs(1));
    }
}
