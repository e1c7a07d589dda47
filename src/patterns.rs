use crate::grid::{Dimensions, Grid, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A named arrangement of live cells, as `(x, y)` offsets from its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

/// Moves one cell down and to the right every 4 generations.
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(1, 0), (1, 1), (1, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
};

pub const PATTERNS: &[Pattern] = &[GLIDER, BLINKER, TOAD, BEACON, R_PENTOMINO];

impl Pattern {
    /// Sets the pattern's cells alive with its top-left corner at `origin`.
    /// Cells that fall off an edge wrap around.
    pub fn apply(&self, grid: &mut Grid, origin: Position) {
        let dimensions = grid.dimensions();
        for &(dx, dy) in self.cells {
            grid.set_cell(dimensions.wrap_offset(origin, dx, dy), true);
        }
    }

    pub fn to_grid(&self, dimensions: Dimensions) -> Grid {
        let mut grid = Grid::new(dimensions);
        self.apply(&mut grid, Position::default());
        grid
    }
}

/// Looks a pattern up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

/// Fills a grid row by row, each cell being alive with probability `density`.
///
/// The same seed always yields the same grid. `density` is clamped to `[0, 1]`
/// and a NaN density fills nothing.
pub fn random_grid(dimensions: Dimensions, seed: u64, density: f64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mut grid = Grid::new(dimensions);

    for y in 0..dimensions.height() {
        for x in 0..dimensions.width() {
            // Only live cells are stored to keep the grid sparse
            if rng.gen_bool(density) {
                grid.set_cell(Position::new(x, y), true);
            }
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_applying_a_pattern_its_cells_are_offset_from_the_origin() {
        let mut grid = Grid::new(Dimensions::new(10, 10).unwrap());

        BLINKER.apply(&mut grid, Position::new(4, 4));

        assert_eq!(
            grid.live_cells(),
            vec![Position::new(5, 4), Position::new(5, 5), Position::new(5, 6)]
        );
    }

    #[test]
    fn when_applying_a_pattern_over_an_edge_it_wraps_around() {
        let mut grid = Grid::new(Dimensions::new(4, 4).unwrap());

        BLINKER.apply(&mut grid, Position::new(3, 3));

        assert_eq!(
            grid.live_cells(),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 3)]
        );
    }

    #[test]
    fn when_a_glider_runs_for_four_generations_it_moves_diagonally() {
        let dimensions = Dimensions::new(10, 10).unwrap();
        let mut grid = GLIDER.to_grid(dimensions);

        for _ in 0..4 {
            grid = grid.next_generation();
        }

        let mut expected = Grid::new(dimensions);
        GLIDER.apply(&mut expected, Position::new(1, 1));
        assert_eq!(grid, expected);
    }

    #[test]
    fn when_a_glider_crosses_the_corner_it_reappears_on_the_other_side() {
        let dimensions = Dimensions::new(5, 5).unwrap();
        let mut grid = GLIDER.to_grid(dimensions);

        // 20 generations move the glider by (5, 5), a full lap of the torus
        for _ in 0..20 {
            grid = grid.next_generation();
        }

        assert_eq!(grid, GLIDER.to_grid(dimensions));
    }

    #[test]
    fn when_a_beacon_runs_for_two_generations_it_returns_to_its_start() {
        let dimensions = Dimensions::new(8, 8).unwrap();
        let grid = BEACON.to_grid(dimensions);

        let next = grid.next_generation();
        assert_eq!(next.population(), 6);
        assert_eq!(next.next_generation(), grid);
    }

    #[test]
    fn when_finding_a_pattern_the_name_is_case_insensitive() {
        assert_eq!(find("glider").unwrap().name, "Glider");
        assert_eq!(find("R-PENTOMINO").unwrap().cells.len(), 5);
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn when_filling_randomly_with_the_same_seed_the_grids_are_equal() {
        let dimensions = Dimensions::new(30, 20).unwrap();

        let first = random_grid(dimensions, 42, 0.5);
        let second = random_grid(dimensions, 42, 0.5);

        assert_eq!(first, second);
        assert!(first.population() > 0);
        assert!(first.population() < dimensions.area());
    }

    #[test]
    fn when_filling_randomly_with_extreme_densities_the_grid_is_empty_or_full() {
        let dimensions = Dimensions::new(6, 4).unwrap();

        assert!(random_grid(dimensions, 7, 0.0).is_empty());
        assert_eq!(random_grid(dimensions, 7, 1.0).population(), 24);
        assert_eq!(random_grid(dimensions, 7, 3.5).population(), 24);
    }
}
