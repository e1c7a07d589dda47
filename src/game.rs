use crate::error::Error;
use crate::grid::{Cell, Dimensions, Grid, Position};
use crate::replay::{create_replay_logger, ReplayLogger};
use tracing::debug;

/// The Game of Life.
/// Main entry point for running a simulation.
pub struct Game {
    grid: Grid,
    dimensions: Dimensions,
    generation: usize,
    replay_logger: Box<dyn ReplayLogger>,
    // The replay baseline is refreshed on the next step to include cell edits
    replay_baseline_pending: bool,
}

/// Represents the state of the game after a generation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GameState {
    /// The number of generations computed so far.
    pub generation: usize,
    /// The number of live cells.
    pub population: usize,
    /// The live cells, sorted row by row.
    pub live_cells: Vec<Position>,
}

impl Game {
    /// Creates a new game on an empty grid.
    ///
    /// # Arguments
    /// * `dimensions` - The fixed size of the toroidal grid.
    pub fn new(dimensions: Dimensions) -> Game {
        Game::with_grid(Grid::new(dimensions))
    }

    /// Creates a new game starting from an already seeded grid.
    ///
    /// # Arguments
    /// * `grid` - The first generation. Its dimensions become the game's dimensions.
    pub fn with_grid(grid: Grid) -> Game {
        let dimensions = grid.dimensions();

        Game {
            grid,
            dimensions,
            generation: 0,
            replay_logger: create_replay_logger(None, dimensions),
            replay_baseline_pending: false,
        }
    }

    /// Records every generation of this game to a JSON replay file.
    ///
    /// The replay starts from the current generation, so it may be attached mid-run.
    /// Nothing is written until [`Game::save_replay`] is called.
    ///
    /// # Arguments
    /// * `filename` - The path the replay is saved to.
    pub fn with_replay(mut self, filename: impl Into<String>) -> Game {
        self.replay_logger = create_replay_logger(Some(filename.into()), self.dimensions);
        self.log_replay_baseline();
        self
    }

    /// Restarts the game from a new first generation.
    ///
    /// The generation counter goes back to 0 and any recorded replay is discarded.
    ///
    /// # Arguments
    /// * `grid` - The new first generation. It must have the game's dimensions.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if the grid has other dimensions.
    pub fn reset(&mut self, grid: Grid) -> Result<(), Error> {
        if grid.dimensions() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                found: grid.dimensions(),
            });
        }

        self.grid = grid;
        self.generation = 0;
        self.replay_logger.clear();
        self.log_replay_baseline();
        Ok(())
    }

    pub fn set_cell(&mut self, position: Position, alive: bool) {
        self.grid.set_cell(position, alive);
    }

    pub fn get_cell(&self, position: Position) -> Cell {
        self.grid.get_cell(position)
    }

    pub fn toggle_cell(&mut self, position: Position) {
        self.grid.toggle_cell(position);
    }

    pub fn should_live(&self, position: Position) -> bool {
        self.grid.should_live(position)
    }

    pub fn live_neighbor_count(&self, position: Position) -> u8 {
        self.grid.live_neighbor_count(position)
    }

    /// Replaces the current grid with its successor.
    pub fn next_generation(&mut self) {
        if self.replay_baseline_pending {
            self.log_replay_baseline();
            self.replay_baseline_pending = false;
        }

        let next = self.grid.next_generation();

        let before = self.grid.population();
        let after = next.population();
        let births = next
            .live_cells()
            .into_iter()
            .filter(|position| !self.grid.get_cell(*position).alive)
            .count();
        // after = before - deaths + births
        let deaths = before + births - after;

        self.grid = next;
        self.generation += 1;
        debug_assert_eq!(self.grid.dimensions(), self.dimensions);

        self.replay_logger
            .log_generation(self.generation, after, births, deaths);

        debug!(
            generation = self.generation,
            population = after,
            births,
            deaths,
            "computed generation"
        );
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Takes a snapshot of the current generation.
    pub fn state(&self) -> GameState {
        GameState {
            generation: self.generation,
            population: self.grid.population(),
            live_cells: self.grid.live_cells(),
        }
    }

    /// Saves the replay, if one was requested with [`Game::with_replay`].
    ///
    /// # Errors
    /// Fails if the replay file cannot be created or written.
    pub fn save_replay(&self) -> Result<(), Error> {
        self.replay_logger.save()
    }

    fn log_replay_baseline(&mut self) {
        self.replay_logger
            .log_initial(self.generation, self.grid.live_cells());
        self.replay_baseline_pending = true;
    }
}
