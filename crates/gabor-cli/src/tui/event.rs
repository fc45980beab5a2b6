use crossterm::event::Event;

#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Time to advance the frame clock of the active screen.
    Tick,
    /// Time to redraw.
    Render,
    /// Key press, resize or other terminal input.
    Terminal(Event),
}
