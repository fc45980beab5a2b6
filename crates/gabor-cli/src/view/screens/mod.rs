pub use self::{
    game::GameScreen,
    menu::{MenuScreen, PlaySettings},
};

mod game;
mod menu;
