//! Five-in-a-row on an unbounded, pannable grid.
//!
//! The game logic (`model`, `viewport`, `input`, `win`, `render`, `game`)
//! has no browser dependency; `canvas` and `components` host it in a Yew app.

pub mod canvas;
pub mod components;
pub mod game;
pub mod input;
pub mod model;
pub mod render;
pub mod settings;
pub mod state;
pub mod util;
pub mod viewport;
pub mod win;
