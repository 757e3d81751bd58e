use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{BaseTile, GRID_SIZE, Grid, Position, Tile};

/// Result of a settle pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleReport {
    /// Tiles that moved down, as `(from, to)` pairs.
    pub moved: Vec<(Position, Position)>,
    /// Cells filled with fresh base tiles.
    pub refilled: Vec<(Position, Tile)>,
}

impl SettleReport {
    /// Where the tile that was at `pos` before settling ended up.
    #[must_use]
    pub fn destination(&self, pos: Position) -> Position {
        self.moved
            .iter()
            .find(|(from, _)| *from == pos)
            .map_or(pos, |&(_, to)| to)
    }
}

/// Compacts every column toward the bottom and refills vacated cells.
///
/// Within a column, surviving tiles keep their relative order and are packed
/// against the bottom. The cells above them are filled top-down with
/// uniformly drawn base tiles, so the grid is full afterwards. Columns without
/// empty cells are left untouched and consume no randomness.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use tilecrush_engine::{Grid, Position, settle};
///
/// let mut grid = Grid::EMPTY;
/// let report = settle(&mut grid, &mut Pcg32::seed_from_u64(0));
/// assert!(grid.is_full());
/// assert_eq!(report.refilled.len(), Grid::SIZE * Grid::SIZE);
/// ```
pub fn settle<R>(grid: &mut Grid, rng: &mut R) -> SettleReport
where
    R: Rng + ?Sized,
{
    let mut report = SettleReport::default();
    for col in 0..GRID_SIZE {
        settle_column(grid, col, rng, &mut report);
    }
    if !report.refilled.is_empty() {
        debug!(
            "settled grid: {} moved, {} refilled",
            report.moved.len(),
            report.refilled.len()
        );
    }
    report
}

fn settle_column<R>(grid: &mut Grid, col: usize, rng: &mut R, report: &mut SettleReport)
where
    R: Rng + ?Sized,
{
    // Walk bottom-up, writing each surviving tile to the lowest free slot.
    let mut write_row = GRID_SIZE;
    for row in (0..GRID_SIZE).rev() {
        let from = Position::new(row, col);
        let Some(tile) = grid.take(from) else {
            continue;
        };
        write_row -= 1;
        let to = Position::new(write_row, col);
        grid.set(to, Some(tile));
        if from != to {
            report.moved.push((from, to));
        }
    }

    for row in 0..write_row {
        let pos = Position::new(row, col);
        let tile = rng.sample(BaseTile);
        grid.set(pos, Some(tile));
        report.refilled.push((pos, tile));
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn column(grid: &Grid, col: usize) -> Vec<Option<Tile>> {
        (0..GRID_SIZE)
            .map(|row| grid.get(Position::new(row, col)))
            .collect()
    }

    fn full_grid() -> Grid {
        Grid::random(&mut Pcg32::seed_from_u64(3))
    }

    #[test]
    fn test_compaction_preserves_order() {
        let mut grid = full_grid();
        let col = 4;
        // Column top to bottom: A . B . C followed by five emptied cells, so
        // the surviving tiles must land in rows 7..10.
        let layout = [
            Some(Tile::Bonus),
            None,
            Some(Tile::Super),
            None,
            Some(Tile::Ultimate),
            None,
            None,
            None,
            None,
            None,
        ];
        for (row, cell) in layout.into_iter().enumerate() {
            grid.set(Position::new(row, col), cell);
        }

        let report = settle(&mut grid, &mut Pcg32::seed_from_u64(9));
        let after = column(&grid, col);
        assert_eq!(
            after[7..],
            [Some(Tile::Bonus), Some(Tile::Super), Some(Tile::Ultimate)]
        );
        assert!(after[..7].iter().all(|c| c.is_some_and(Tile::is_base)));
        assert_eq!(report.refilled.len(), 7);
        assert!(grid.is_full());
    }

    #[test]
    fn test_gapped_column_above_untouched_tiles() {
        // [A, ., B, ., C] at the bottom of a column becomes [new, new, A, B, C].
        let mut grid = full_grid();
        let col = 0;
        grid.set(Position::new(5, col), Some(Tile::Bonus));
        grid.set(Position::new(6, col), None);
        grid.set(Position::new(7, col), Some(Tile::Super));
        grid.set(Position::new(8, col), None);
        grid.set(Position::new(9, col), Some(Tile::Ultimate));
        let above: Vec<_> = column(&grid, col)[..5].to_vec();

        settle(&mut grid, &mut Pcg32::seed_from_u64(1));
        let after = column(&grid, col);
        assert_eq!(after[2..7], above[..]);
        assert_eq!(
            after[7..],
            [Some(Tile::Bonus), Some(Tile::Super), Some(Tile::Ultimate)]
        );
        assert!(after[..2].iter().all(|c| c.is_some_and(Tile::is_base)));
    }

    #[test]
    fn test_fully_empty_column_is_refilled() {
        let mut grid = full_grid();
        for row in 0..GRID_SIZE {
            grid.set(Position::new(row, 9), None);
        }
        let report = settle(&mut grid, &mut Pcg32::seed_from_u64(2));
        assert!(grid.is_full());
        assert!(report.moved.is_empty());
        assert_eq!(report.refilled.len(), GRID_SIZE);
        assert!(report.refilled.iter().all(|(pos, _)| pos.col == 9));
    }

    #[test]
    fn test_destination_follows_moved_tiles() {
        let mut grid = full_grid();
        grid.set(Position::new(8, 3), None);
        let report = settle(&mut grid, &mut Pcg32::seed_from_u64(4));
        assert_eq!(report.destination(Position::new(7, 3)), Position::new(8, 3));
        assert_eq!(report.destination(Position::new(0, 3)), Position::new(1, 3));
        assert_eq!(report.destination(Position::new(9, 3)), Position::new(9, 3));
        assert_eq!(report.destination(Position::new(7, 4)), Position::new(7, 4));
    }

    #[test]
    fn test_full_grid_is_untouched() {
        let mut grid = full_grid();
        let before = grid.clone();
        let report = settle(&mut grid, &mut Pcg32::seed_from_u64(2));
        assert_eq!(grid, before);
        assert_eq!(report, SettleReport::default());
    }

    #[test]
    fn test_other_columns_untouched() {
        let mut grid = full_grid();
        let before = grid.clone();
        grid.set(Position::new(0, 2), None);
        settle(&mut grid, &mut Pcg32::seed_from_u64(2));
        for col in (0..GRID_SIZE).filter(|&c| c != 2) {
            assert_eq!(column(&grid, col), column(&before, col));
        }
        assert_eq!(column(&grid, 2)[1..], column(&before, 2)[1..]);
    }
}
