use std::fmt;

use arrayvec::ArrayVec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ParseGridError;

use super::tile::{BaseTile, Tile};

/// Side length of the square grid.
pub const GRID_SIZE: usize = 10;

const EMPTY_CHAR: char = '.';

/// A cell coordinate, origin at the top-left.
///
/// Positions order row-major, so iterating a `BTreeSet<Position>` visits cells
/// top to bottom, left to right.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the position shifted by `(dr, dc)`, or `None` if it leaves the grid.
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Self { row, col })
    }

    /// Up, down, left and right neighbors inside the grid.
    #[must_use]
    pub fn neighbors4(self) -> ArrayVec<Position, 4> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(|(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// All eight surrounding positions inside the grid.
    #[must_use]
    pub fn neighbors8(self) -> ArrayVec<Position, 8> {
        let mut neighbors = ArrayVec::new();
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(pos) = self.offset(dr, dc) {
                    neighbors.push(pos);
                }
            }
        }
        neighbors
    }
}

/// The fixed-size tile grid.
///
/// Stored row-major with `None` marking an empty cell. Outside of an elimination
/// in progress the grid is always full.
///
/// All accessors validate coordinates and panic on out-of-bounds access, so a
/// coordinate-mapping bug in a caller surfaces immediately instead of being
/// clamped away.
///
/// # Example
///
/// ```
/// use tilecrush_engine::{Grid, Position, Tile};
///
/// let mut grid = Grid::EMPTY;
/// grid.set(Position::new(2, 3), Some(Tile::Blue));
/// assert_eq!(grid.get(Position::new(2, 3)), Some(Tile::Blue));
/// assert!(Grid::in_bounds(9, 9));
/// assert!(!Grid::in_bounds(-1, 0));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: [[Option<Tile>; GRID_SIZE]; GRID_SIZE],
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{")?;
        for line in self.to_rows() {
            writeln!(f, "    {line}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

impl Grid {
    pub const SIZE: usize = GRID_SIZE;

    pub const EMPTY: Self = Self {
        rows: [[None; GRID_SIZE]; GRID_SIZE],
    };

    /// Creates a grid with an independent uniform base-color draw per cell.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut grid = Self::EMPTY;
        for row in &mut grid.rows {
            for cell in row {
                *cell = Some(rng.sample(BaseTile));
            }
        }
        grid
    }

    /// Parses a grid from one string per row using the [`Tile::as_char`] notation.
    ///
    /// `.` denotes an empty cell. Whitespace inside a row is ignored.
    ///
    /// ```
    /// use tilecrush_engine::{Grid, Position, Tile};
    ///
    /// let grid = Grid::from_rows(&[
    ///     "RRRGBOPGBO",
    ///     "GBOPGBOPGB",
    ///     "BOPGBOPGBO",
    ///     "OPGBOPGBOP",
    ///     "PGBOPGBOPG",
    ///     "GBOPGBOPGB",
    ///     "BOPGBOPGBO",
    ///     "OPGBOPGBOP",
    ///     "PGBOPGBOPG",
    ///     "GBOPGB*$D@",
    /// ])
    /// .unwrap();
    /// assert_eq!(grid.get(Position::new(9, 6)), Some(Tile::Wildcard));
    /// ```
    pub fn from_rows<S>(rows: &[S]) -> Result<Self, ParseGridError>
    where
        S: AsRef<str>,
    {
        if rows.len() != GRID_SIZE {
            return Err(ParseGridError::RowCount {
                expected: GRID_SIZE,
                actual: rows.len(),
            });
        }
        let mut grid = Self::EMPTY;
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if symbols.len() != GRID_SIZE {
                return Err(ParseGridError::ColumnCount {
                    row,
                    expected: GRID_SIZE,
                    actual: symbols.len(),
                });
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                grid.rows[row][col] = if symbol == EMPTY_CHAR {
                    None
                } else {
                    Some(
                        Tile::from_char(symbol)
                            .ok_or(ParseGridError::UnknownSymbol { row, col, symbol })?,
                    )
                };
            }
        }
        Ok(grid)
    }

    /// Returns one string per row in the notation accepted by [`Self::from_rows`].
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(EMPTY_CHAR, Tile::as_char))
                    .collect()
            })
            .collect()
    }

    /// Returns whether the signed coordinate lies inside the grid.
    #[must_use]
    pub fn in_bounds(row: isize, col: isize) -> bool {
        usize::try_from(row).is_ok_and(|r| r < GRID_SIZE)
            && usize::try_from(col).is_ok_and(|c| c < GRID_SIZE)
    }

    pub(crate) fn check_bounds(pos: Position) {
        assert!(
            pos.row < GRID_SIZE && pos.col < GRID_SIZE,
            "position {pos} is outside the {GRID_SIZE}x{GRID_SIZE} grid",
        );
    }

    /// Returns the tile at `pos`, or `None` if the cell is empty.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        Self::check_bounds(pos);
        self.rows[pos.row][pos.col]
    }

    /// Sets the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, value: Option<Tile>) {
        Self::check_bounds(pos);
        self.rows[pos.row][pos.col] = value;
    }

    /// Takes the tile out of `pos`, leaving the cell empty.
    pub fn take(&mut self, pos: Position) -> Option<Tile> {
        Self::check_bounds(pos);
        self.rows[pos.row][pos.col].take()
    }

    #[must_use]
    pub fn rows(&self) -> &[[Option<Tile>; GRID_SIZE]; GRID_SIZE] {
        &self.rows
    }

    /// Iterates all positions row-major.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Position::new(row, col)))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, Option<Tile>)> + '_ {
        Self::positions().map(|pos| (pos, self.get(pos)))
    }

    /// Returns whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_some)
    }

    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(tile))
            .count()
    }

    #[must_use]
    pub fn special_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .flatten()
            .filter(|tile| tile.is_special())
            .count()
    }
}
