use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// One full-terminal view of the application.
///
/// A screen lives on a [`ScreenStack`]. Only the top screen receives input,
/// ticks and draw calls.
///
/// ```text
/// push ──> on_active ──> (top of stack) ──> on_inactive ──> on_close ──> drop
///              ^                                 │
///              └──── screen above is popped ─────┘ (pushed over)
/// ```
///
/// [`on_active`](Self::on_active) is the place to configure the
/// [`Runtime`] (tick rate, frame rate), since it runs again whenever the
/// screen comes back to the top.
pub trait Screen: fmt::Debug {
    /// The screen became the top of the stack.
    fn on_active(&mut self, runtime: &mut Runtime);

    /// The screen stopped being the top of the stack, either because another
    /// screen was pushed over it or because it is about to be closed.
    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    /// The screen is leaving the stack for good.
    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    fn update(&mut self, runtime: &mut Runtime);

    fn draw(&self, frame: &mut Frame);
}

/// What the stack should do after the top screen handled an event.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Put a new screen over the current one.
    Push(Box<dyn Screen>),
    /// Close the current screen and go back to the one below.
    Pop,
    /// Close every screen.
    Exit,
}

#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    exiting: bool,
}

impl ScreenStack {
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            exiting: false,
        }
    }

    /// Number of screens on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn init(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            top.on_active(runtime);
        }
    }

    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.exiting || self.screens.is_empty()
    }

    pub fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.handle_event(runtime, event);
            self.apply(runtime, transition);
        }
    }

    pub fn update(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            top.update(runtime);
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        if let Some(top) = self.screens.last() {
            top.draw(frame);
        }
    }

    fn apply(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(top) = self.screens.last_mut() {
                    top.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                if let Some(top) = self.screens.last_mut() {
                    top.on_active(runtime);
                }
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.exiting = true;
            }
        }
    }

    fn close_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEvent};

    use super::*;

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Screen that records every call and answers events with a queued
    /// transition.
    #[derive(Debug)]
    struct Probe {
        name: &'static str,
        journal: Journal,
        next: Option<ScreenTransition>,
    }

    impl Probe {
        fn boxed(name: &'static str, journal: &Journal) -> Box<Self> {
            Box::new(Self {
                name,
                journal: Rc::clone(journal),
                next: None,
            })
        }

        fn then(mut self: Box<Self>, transition: ScreenTransition) -> Box<Self> {
            self.next = Some(transition);
            self
        }

        fn record(&self, call: &str) {
            self.journal.borrow_mut().push(format!("{} {call}", self.name));
        }
    }

    impl Screen for Probe {
        fn on_active(&mut self, _runtime: &mut Runtime) {
            self.record("active");
        }

        fn on_inactive(&mut self, _runtime: &mut Runtime) {
            self.record("inactive");
        }

        fn on_close(&mut self, _runtime: &mut Runtime) {
            self.record("close");
        }

        fn handle_event(&mut self, _runtime: &mut Runtime, _event: &Event) -> ScreenTransition {
            self.record("event");
            self.next.take().unwrap_or(ScreenTransition::Stay)
        }

        fn update(&mut self, _runtime: &mut Runtime) {
            self.record("update");
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key() -> Event {
        Event::Key(KeyEvent::from(KeyCode::Enter))
    }

    fn drain(journal: &Journal) -> Vec<String> {
        journal.borrow_mut().drain(..).collect()
    }

    #[test]
    fn test_menu_to_game_and_back() {
        let journal = Journal::default();
        let game = Probe::boxed("game", &journal).then(ScreenTransition::Pop);
        let menu = Probe::boxed("menu", &journal).then(ScreenTransition::Push(game));
        let mut stack = ScreenStack::new(menu);
        let mut runtime = Runtime::new();

        stack.init(&mut runtime);
        assert_eq!(drain(&journal), ["menu active"]);

        stack.handle_event(&mut runtime, &key());
        assert_eq!(stack.depth(), 2);
        assert_eq!(
            drain(&journal),
            ["menu event", "menu inactive", "game active"]
        );

        stack.update(&mut runtime);
        assert_eq!(drain(&journal), ["game update"]);

        stack.handle_event(&mut runtime, &key());
        assert_eq!(stack.depth(), 1);
        assert_eq!(
            drain(&journal),
            ["game event", "game inactive", "game close", "menu active"]
        );
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_exit_closes_every_screen_top_down() {
        let journal = Journal::default();
        let top = Probe::boxed("top", &journal).then(ScreenTransition::Exit);
        let bottom = Probe::boxed("bottom", &journal).then(ScreenTransition::Push(top));
        let mut stack = ScreenStack::new(bottom);
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        stack.handle_event(&mut runtime, &key());
        drain(&journal);

        stack.handle_event(&mut runtime, &key());
        assert_eq!(
            drain(&journal),
            [
                "top event",
                "top inactive",
                "top close",
                "bottom inactive",
                "bottom close",
            ]
        );
        assert!(stack.should_exit());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let journal = Journal::default();
        let only = Probe::boxed("only", &journal).then(ScreenTransition::Pop);
        let mut stack = ScreenStack::new(only);
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        assert!(!stack.should_exit());

        stack.handle_event(&mut runtime, &key());
        assert!(stack.should_exit());
    }

    #[test]
    fn test_stay_leaves_lifecycle_alone() {
        let journal = Journal::default();
        let mut stack = ScreenStack::new(Probe::boxed("a", &journal));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        drain(&journal);

        stack.handle_event(&mut runtime, &key());
        assert_eq!(drain(&journal), ["a event"]);
        assert_eq!(stack.depth(), 1);
    }
}
