use clap::Parser;
use life_engine::{patterns, Dimensions, Error, Game, Grid, Position};
use tracing::warn;

/// Runs a headless simulation and reports the population of each generation.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of columns in the grid.
    #[arg(long, default_value_t = 40)]
    width: i32,
    /// Number of rows in the grid.
    #[arg(long, default_value_t = 20)]
    height: i32,
    /// Number of generations to compute.
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Named pattern to seed the grid with. Ignored when `--seed` is set.
    #[arg(long, default_value = "glider")]
    pattern: String,
    /// Seed for a random fill instead of a pattern.
    #[arg(long)]
    seed: Option<u64>,
    /// Probability of a cell being alive in a random fill.
    #[arg(long, default_value_t = 0.3)]
    density: f64,
    /// Path of a JSON replay to write at the end of the run.
    #[arg(long)]
    replay: Option<String>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let dimensions = Dimensions::new(args.width, args.height)?;

    let grid = match args.seed {
        Some(seed) => patterns::random_grid(dimensions, seed, args.density),
        None => {
            let mut grid = Grid::new(dimensions);
            match patterns::find(&args.pattern) {
                Some(pattern) => pattern.apply(&mut grid, Position::default()),
                None => warn!(pattern = %args.pattern, "unknown pattern, starting empty"),
            }
            grid
        }
    };

    let mut game = Game::with_grid(grid);
    if let Some(replay) = args.replay {
        game = game.with_replay(replay);
    }

    for _ in 0..args.generations {
        game.next_generation();
        println!(
            "Generation {}: {} live cells",
            game.generation(),
            game.population()
        );
    }

    game.save_replay()
}
