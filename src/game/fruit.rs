use log::debug;
use rand::Rng;

use super::error::GameError;
use super::grid::{Cell, Grid};
use super::snake::{Color, Snake};

/// The single fruit on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fruit {
    pub cell: Cell,
    pub color: Color,
}

impl Fruit {
    pub fn new(cell: Cell, color: Color) -> Self {
        Self { cell, color }
    }
}

impl Default for Fruit {
    fn default() -> Self {
        Self::new(Cell::new(0, 0), Color::RED)
    }
}

/// Picks free cells and colours for the fruit from an injected random source
#[derive(Debug, Clone)]
pub struct FruitSpawner<R> {
    rng: R,
    max_attempts: u32,
}

impl<R: Rng> FruitSpawner<R> {
    pub fn new(rng: R, max_attempts: u32) -> Self {
        Self { rng, max_attempts }
    }

    /// Move the fruit to a random cell the snake does not occupy and give it
    /// a fresh random colour.
    ///
    /// Cells are drawn uniformly until a free one turns up. After
    /// `max_attempts` misses the free cells are enumerated and one is drawn
    /// from those instead, so a crowded grid still terminates.
    pub fn respawn(&mut self, fruit: &mut Fruit, snake: &Snake, grid: &Grid) -> Result<Cell, GameError> {
        let cells = grid.cell_count();
        if snake.len() >= cells && grid.cells().all(|cell| snake.occupies(cell)) {
            return Err(GameError::NoFreeCell { cells });
        }

        let cell = match self.sample(snake, grid) {
            Some(cell) => cell,
            None => self.pick_free(snake, grid)?,
        };

        fruit.cell = cell;
        fruit.color = Color(self.rng.gen_range(0..=Color::MAX));
        debug!(
            "Fruit respawned at ({}, {}) with colour {:06x}",
            cell.x, cell.z, fruit.color.0
        );

        Ok(cell)
    }

    fn sample(&mut self, snake: &Snake, grid: &Grid) -> Option<Cell> {
        for _ in 0..self.max_attempts {
            let column = self.rng.gen_range(0..grid.columns());
            let row = self.rng.gen_range(0..grid.rows());
            let cell = grid.cell_at(column, row);

            if !snake.occupies(cell) {
                return Some(cell);
            }
        }
        None
    }

    fn pick_free(&mut self, snake: &Snake, grid: &Grid) -> Result<Cell, GameError> {
        let free: Vec<Cell> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();
        if free.is_empty() {
            return Err(GameError::NoFreeCell {
                cells: grid.cell_count(),
            });
        }
        Ok(free[self.rng.gen_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::snake::Segment;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const RNG_SEED: u64 = 42;

    fn spawner(max_attempts: u32) -> FruitSpawner<ChaCha8Rng> {
        FruitSpawner::new(ChaCha8Rng::seed_from_u64(RNG_SEED), max_attempts)
    }

    fn snake_covering(grid: &Grid, skip: usize) -> Snake {
        Snake::from_segments(
            grid.cells()
                .skip(skip)
                .map(|cell| Segment {
                    cell,
                    color: Color::BODY,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_respawn_avoids_snake() {
        let grid = Grid::new(100, 100, 10);
        let snake = Snake::new(&grid, 6);
        let mut spawner = spawner(4096);
        let mut fruit = Fruit::default();

        for _ in 0..500 {
            let cell = spawner.respawn(&mut fruit, &snake, &grid).unwrap();
            assert_eq!(cell, fruit.cell);
            assert!(grid.contains(cell));
            assert!(!snake.occupies(cell));
        }
    }

    #[test]
    fn test_respawn_recolors() {
        let grid = Grid::new(100, 100, 10);
        let snake = Snake::new(&grid, 3);
        let mut spawner = spawner(4096);
        let mut fruit = Fruit::default();

        let mut colors = std::collections::HashSet::new();
        for _ in 0..20 {
            spawner.respawn(&mut fruit, &snake, &grid).unwrap();
            assert!(fruit.color.0 <= Color::MAX);
            colors.insert(fruit.color);
        }
        assert!(colors.len() > 1);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let grid = Grid::new(400, 400, 10);
        let snake = Snake::new(&grid, 3);

        let mut first = spawner(4096);
        let mut second = spawner(4096);
        let mut fruit_a = Fruit::default();
        let mut fruit_b = Fruit::default();

        for _ in 0..10 {
            first.respawn(&mut fruit_a, &snake, &grid).unwrap();
            second.respawn(&mut fruit_b, &snake, &grid).unwrap();
            assert_eq!(fruit_a, fruit_b);
        }
    }

    #[test]
    fn test_single_free_cell_found_by_fallback() {
        let grid = Grid::new(40, 40, 10);
        let snake = snake_covering(&grid, 1);
        let mut spawner = spawner(0);
        let mut fruit = Fruit::default();

        let cell = spawner.respawn(&mut fruit, &snake, &grid).unwrap();
        assert_eq!(cell, Cell::new(0, 0));
    }

    #[test]
    fn test_full_grid_reports_no_free_cell() {
        let grid = Grid::new(40, 40, 10);
        let snake = snake_covering(&grid, 0);
        let mut spawner = spawner(4096);
        let mut fruit = Fruit::default();

        let result = spawner.respawn(&mut fruit, &snake, &grid);
        assert_eq!(result, Err(GameError::NoFreeCell { cells: 16 }));
        assert_eq!(fruit, Fruit::default());
    }
}
