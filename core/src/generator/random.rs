use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Uniformly random generator over a seeded RNG.
///
/// The RNG state carries over between calls, so one generator yields a reproducible sequence of grids for a given
/// seed, including the extra grids drawn when a first click has to be moved off a mine.
#[derive(Clone, Debug)]
pub struct RandomGridGenerator {
    rng: SmallRng,
    placement: Placement,
}

impl RandomGridGenerator {
    pub fn new(seed: u64, placement: Placement) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            placement,
        }
    }

    fn place_by_rejection(&mut self, mines: &mut Array2<bool>, count: CellCount) {
        let (rows, cols) = mines.dim();
        let mut placed = 0;
        let mut collisions = 0u32;

        while placed < count {
            let row = self.rng.random_range(0..rows);
            let col = self.rng.random_range(0..cols);
            if mines[(row, col)] {
                collisions += 1;
                continue;
            }
            mines[(row, col)] = true;
            placed += 1;
        }

        log::trace!("placed {} mines with {} collisions", placed, collisions);
    }

    fn place_by_shuffle(&mut self, mines: &mut Array2<bool>, count: CellCount) {
        let (rows, cols) = mines.dim();
        let mut coords: Vec<(usize, usize)> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .collect();

        let (chosen, _) = coords.partial_shuffle(&mut self.rng, count.into());
        for &index in chosen.iter() {
            mines[index] = true;
        }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(&mut self, config: GameConfig) -> Grid {
        let total_cells = config.total_cells();
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());

        if total_cells == 0 {
            log::warn!("Requested an empty grid of size {:?}", config.size);
            return Grid::from_valid_mask(&mines);
        }

        // keep at least one safe cell, otherwise no first click can ever be made safe
        let count = if config.mines >= total_cells {
            log::warn!(
                "Grid too small, requested {} mines but only fits {}",
                config.mines,
                total_cells - 1
            );
            total_cells - 1
        } else {
            config.mines
        };

        match self.placement {
            Placement::Rejection => self.place_by_rejection(&mut mines, count),
            Placement::Shuffle => self.place_by_shuffle(&mut mines, count),
        }

        let grid = Grid::from_valid_mask(&mines);

        // double check mine count
        if grid.mine_count() != count {
            log::warn!(
                "Generated grid count mismatch, actual: {}, requested: {}",
                grid.mine_count(),
                count
            );
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(grid: &Grid) {
        for (coords, cell) in grid.iter() {
            assert_eq!(cell.state, CellState::Hidden);
            assert!(!cell.highlighted);
            if !cell.is_mine() {
                let expected = grid
                    .iter_neighbors(coords)
                    .filter(|&pos| grid[pos].is_mine())
                    .count() as u8;
                assert_eq!(cell.value, CellValue::from_count(expected));
            }
        }
    }

    #[test]
    fn rejection_places_exact_mine_count() {
        let mut generator = RandomGridGenerator::new(7, Placement::Rejection);
        let grid = generator.generate(GameConfig::default());

        assert_eq!(grid.size(), (16, 30));
        assert_eq!(grid.mine_count(), 99);
        assert_eq!(grid.iter().filter(|(_, cell)| cell.is_mine()).count(), 99);
        assert_consistent(&grid);
    }

    #[test]
    fn shuffle_places_exact_mine_count() {
        let mut generator = RandomGridGenerator::new(7, Placement::Shuffle);
        let grid = generator.generate(GameConfig::new((9, 9), 10).unwrap());

        assert_eq!(grid.mine_count(), 10);
        assert_consistent(&grid);
    }

    #[test]
    fn dense_board_still_terminates() {
        let mut generator = RandomGridGenerator::new(3, Placement::Rejection);
        let grid = generator.generate(GameConfig::new((4, 4), 15).unwrap());

        assert_eq!(grid.mine_count(), 15);
        assert_eq!(grid.safe_cell_count(), 1);
    }

    #[test]
    fn overfull_request_keeps_one_safe_cell() {
        let mut generator = RandomGridGenerator::new(3, Placement::Shuffle);
        let grid = generator.generate(GameConfig::new_unchecked((2, 2), 10));

        assert_eq!(grid.mine_count(), 3);
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = GameConfig::new((8, 8), 12).unwrap();
        let mut a = RandomGridGenerator::new(42, Placement::Rejection);
        let mut b = RandomGridGenerator::new(42, Placement::Rejection);

        assert_eq!(a.generate(config), b.generate(config));
        assert_eq!(a.generate(config), b.generate(config));
    }

    #[test]
    fn successive_grids_differ() {
        let config = GameConfig::default();
        let mut generator = RandomGridGenerator::new(42, Placement::Rejection);

        assert_ne!(generator.generate(config), generator.generate(config));
    }
}
