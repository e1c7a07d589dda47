//! # life_engine
//!
//! The core engine for Conway's Game of Life on a toroidal grid.
//! Only live cells are stored, and each generation is computed from the cells
//! around them, so the work grows with the population rather than the grid area.

pub mod game;
pub use game::Game;
pub use game::GameState;

pub mod grid;
pub use grid::wrap;
pub use grid::Cell;
pub use grid::Dimensions;
pub use grid::Grid;
pub use grid::Position;

pub mod patterns;
pub use patterns::Pattern;

mod error;
pub use error::Error;

mod replay;
