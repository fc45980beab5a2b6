//! Terminal event loop and screen stack.

pub use self::{
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod event;
mod event_loop;
mod runtime;
mod screen;
